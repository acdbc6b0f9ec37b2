//! Pointer-control seam and the drag gesture built on it.

use std::time::Duration;

use boardsight_core::Point;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("pointer {action} to {at} failed: {reason}")]
    ActionFailed {
        action: &'static str,
        at: Point,
        reason: String,
    },
}

/// Absolute-coordinate pointer driver.
///
/// `drag_to` presses, moves and releases; callers always issue a `move_to`
/// first so the press happens on the intended square.
pub trait PointerControl {
    fn move_to(&mut self, p: Point) -> Result<(), PointerError>;
    fn drag_to(&mut self, p: Point) -> Result<(), PointerError>;
}

/// Move to the source, wait `settle`, drag to the destination.
///
/// No retries; the first failing step is returned as is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragGesture {
    pub settle: Duration,
}

impl Default for DragGesture {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(100),
        }
    }
}

impl DragGesture {
    pub fn perform(
        &self,
        pointer: &mut dyn PointerControl,
        from: Point,
        to: Point,
    ) -> Result<(), PointerError> {
        pointer.move_to(from)?;
        if !self.settle.is_zero() {
            std::thread::sleep(self.settle);
        }
        pointer.drag_to(to)
    }
}

/// Dry-run pointer that logs gestures instead of moving anything.
#[derive(Clone, Debug, Default)]
pub struct LogPointer {
    position: Option<Point>,
}

impl LogPointer {
    pub fn position(&self) -> Option<Point> {
        self.position
    }
}

impl PointerControl for LogPointer {
    fn move_to(&mut self, p: Point) -> Result<(), PointerError> {
        log::info!("pointer move to {p}");
        self.position = Some(p);
        Ok(())
    }

    fn drag_to(&mut self, p: Point) -> Result<(), PointerError> {
        let Some(from) = self.position else {
            return Err(PointerError::ActionFailed {
                action: "drag",
                at: p,
                reason: "no preceding move".to_string(),
            });
        };
        log::info!("pointer drag {from} -> {p}");
        self.position = Some(p);
        Ok(())
    }
}
