//! Snapshot presentation: compositing a snapshot onto a surface, guarded
//! against stale decode completions.

use crate::snapshot::Snapshot;
use crate::surface::{Surface, SurfaceResult};

/// Composite a snapshot onto a surface: decode and draw the raster, then
/// draw each text annotation on top in list order.
///
/// Snapshot rasters are opaque full-surface captures, so the decoded image
/// covers every pixel and no clear is needed first. A decode failure
/// propagates with the surface left in its pre-decode state.
pub fn present(surface: &mut dyn Surface, snapshot: &Snapshot) -> SurfaceResult<()> {
    surface.draw_image(&snapshot.raster)?;
    for text in &snapshot.texts {
        surface.fill_text(&text.content, text.position, text.font_size, text.color);
    }
    Ok(())
}

/// Token identifying one present request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentToken {
    generation: u64,
}

/// Generation-tagged gatekeeper for applying snapshots to a surface.
///
/// Each request gets a token; completing with a token that is no longer
/// current is discarded. With a backend whose decode completes
/// asynchronously this prevents a slow decode from overwriting the result
/// of a later undo/redo or draw. The bundled raster backend decodes
/// synchronously, which trivially serializes completions.
#[derive(Debug, Clone, Default)]
pub struct Presenter {
    generation: u64,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a present request, invalidating all earlier tokens.
    pub fn begin(&mut self) -> PresentToken {
        self.generation += 1;
        PresentToken {
            generation: self.generation,
        }
    }

    /// Whether a token still refers to the latest request.
    pub fn is_current(&self, token: PresentToken) -> bool {
        token.generation == self.generation
    }

    /// Complete a present request. Returns `Ok(true)` if the snapshot was
    /// applied, `Ok(false)` if the token was stale and the completion
    /// discarded without touching the surface.
    pub fn complete(
        &self,
        token: PresentToken,
        surface: &mut dyn Surface,
        snapshot: &Snapshot,
    ) -> SurfaceResult<bool> {
        if !self.is_current(token) {
            log::debug!(
                "discarding stale present (token generation {}, current {})",
                token.generation,
                self.generation
            );
            return Ok(false);
        }
        present(surface, snapshot)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_staleness() {
        let mut p = Presenter::new();
        let first = p.begin();
        assert!(p.is_current(first));

        let second = p.begin();
        assert!(!p.is_current(first));
        assert!(p.is_current(second));
    }
}
