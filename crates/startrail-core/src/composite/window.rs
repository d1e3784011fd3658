use tracing::debug;

use super::layer::{InsertPosition, Layer};

/// Keep at most `limit` layers, retiring the oldest one when over.
///
/// `limit == 0` means an unbounded trail. Only one layer is ever added per
/// frame, so at most one is retired per call.
///
/// Before the oldest layer is removed, every opacity is shifted one slot
/// toward it. This keeps the fade gradient continuous as the window slides,
/// but it is an approximation: the surviving frames end up carrying the
/// opacities of their older neighbours rather than a re-rendered fade.
pub fn enforce_limit(
    layers: &mut Vec<Layer>,
    limit: usize,
    position: InsertPosition,
) -> Option<Layer> {
    if limit == 0 || layers.len() <= limit {
        return None;
    }

    let last = layers.len() - 1;
    let evicted = match position {
        // Newest at the end, so the oldest sits at index 0.
        InsertPosition::End => {
            for n in (1..=last).rev() {
                layers[n].opacity = layers[n - 1].opacity;
            }
            layers.remove(0)
        }
        // Newest at the front, so the oldest sits at the end.
        InsertPosition::Front => {
            for n in 0..last {
                layers[n].opacity = layers[n + 1].opacity;
            }
            layers.remove(last)
        }
    };

    debug!(
        retired = %evicted.name(),
        remaining = layers.len(),
        "Trail limit reached"
    );
    Some(evicted)
}
