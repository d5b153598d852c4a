use log::{info, warn};
use twenty48_rendering::{
    FrameControl, FrameInput, GridPresentation, Palette, RenderingError, Scene,
};
use twenty48_system_controller::{Controller, MoveOutcome};

/// How an interactive session came to an end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Ending {
    /// The player asked to leave.
    Quit,
    /// A move was attempted on a full board.
    Lost,
    /// A shift succeeded but no empty cell could be drawn for the new tile.
    NoPlacement,
}

/// Couples the move controller with the scene shown by the backend.
#[derive(Debug)]
pub(crate) struct Session {
    controller: Controller,
    palette: Palette,
    scene: Scene,
    ending: Option<Ending>,
}

impl Session {
    /// Prepares the first scene for a freshly started controller.
    pub(crate) fn new(
        controller: Controller,
        palette: Palette,
        cell_width: u16,
    ) -> Result<Self, RenderingError> {
        let grid = GridPresentation::new(controller.board(), &palette, cell_width)?;
        let scene = Scene::new(grid, controller.state());
        Ok(Self {
            controller,
            palette,
            scene,
            ending: None,
        })
    }

    /// Scene reflecting the latest board.
    pub(crate) fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Reason the session stopped, if it did.
    pub(crate) fn ending(&self) -> Option<Ending> {
        self.ending
    }

    /// Applies one frame of input and reports whether the backend should keep going.
    pub(crate) fn handle(&mut self, input: FrameInput) -> FrameControl {
        if input.quit {
            info!(
                "player quit after {} accepted moves",
                self.controller.accepted_moves()
            );
            return self.finish(Ending::Quit);
        }

        let Some(direction) = input.direction else {
            return FrameControl::Continue;
        };

        match self.controller.make_move(direction) {
            Ok(MoveOutcome::Lost) => self.finish(Ending::Lost),
            Ok(MoveOutcome::Accepted { .. } | MoveOutcome::Ignored) => {
                self.refresh();
                FrameControl::Continue
            }
            Err(error) => {
                warn!("{error}");
                self.finish(Ending::NoPlacement)
            }
        }
    }

    fn finish(&mut self, ending: Ending) -> FrameControl {
        self.ending = Some(ending);
        self.refresh();
        FrameControl::Exit
    }

    fn refresh(&mut self) {
        self.scene.grid.update(self.controller.board(), &self.palette);
        self.scene.state = self.controller.state();
    }
}

impl Ending {
    /// Whether the process should report failure.
    pub(crate) const fn is_failure(self) -> bool {
        matches!(self, Ending::NoPlacement)
    }
}
