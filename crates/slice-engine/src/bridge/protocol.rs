/// Frame layout shared with the host page.
/// Must stay in sync with the TypeScript reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Instances: max_instances × 8 floats]
/// [Effects: max_effects_vertices × 2 floats]
/// [Sounds: max_sounds × 1 float]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame next to the counts,
/// so the reader can compute offsets without a separate handshake.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_BACKDROP_END: usize = 4;
pub const HEADER_SILHOUETTE_END: usize = 5;
pub const HEADER_MAX_EFFECTS_VERTICES: usize = 6;
pub const HEADER_EFFECTS_VERTEX_COUNT: usize = 7;
pub const HEADER_MAX_SOUNDS: usize = 8;
pub const HEADER_SOUND_COUNT: usize = 9;
pub const HEADER_MAX_EVENTS: usize = 10;
pub const HEADER_EVENT_COUNT: usize = 11;
/// Iris radius in display pixels, or -1 when no transition is showing.
pub const HEADER_IRIS_RADIUS: usize = 12;
pub const HEADER_SHAKE_X: usize = 13;
pub const HEADER_SHAKE_Y: usize = 14;
pub const HEADER_SILHOUETTE_ALPHA: usize = 15;

pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per effects vertex: x, y.
pub const EFFECTS_VERTEX_FLOATS: usize = 2;

/// Section sizes and offsets for a given set of capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_effects_vertices: usize,
    pub max_sounds: usize,
    pub max_events: usize,

    pub instance_data_offset: usize,
    pub effects_data_offset: usize,
    pub sound_data_offset: usize,
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(
        max_instances: usize,
        max_effects_vertices: usize,
        max_sounds: usize,
        max_events: usize,
    ) -> Self {
        let instance_data_offset = HEADER_FLOATS;
        let effects_data_offset = instance_data_offset + max_instances * RenderInstance::FLOATS;
        let sound_data_offset = effects_data_offset + max_effects_vertices * EFFECTS_VERTEX_FLOATS;
        let event_data_offset = sound_data_offset + max_sounds;
        let buffer_total_floats = event_data_offset + max_events * GameEvent::FLOATS;

        Self {
            max_instances,
            max_effects_vertices,
            max_sounds,
            max_events,
            instance_data_offset,
            effects_data_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_instances,
            config.max_effects_vertices,
            config.max_sounds,
            config.max_events,
        )
    }

    /// Fill the header for one frame. Counts are clamped to capacity.
    pub fn header(
        &self,
        frame: u64,
        buffer: &RenderBuffer,
        sounds: usize,
        events: usize,
    ) -> [f32; HEADER_FLOATS] {
        let instances = (buffer.instance_count() as usize).min(self.max_instances);
        let vertices = buffer.effects.len() / EFFECTS_VERTEX_FLOATS;

        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_FRAME_COUNTER] = frame as f32;
        header[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        header[HEADER_INSTANCE_COUNT] = instances as f32;
        header[HEADER_BACKDROP_END] = (buffer.backdrop_end as usize).min(instances) as f32;
        header[HEADER_SILHOUETTE_END] = (buffer.silhouette_end as usize).min(instances) as f32;
        header[HEADER_MAX_EFFECTS_VERTICES] = self.max_effects_vertices as f32;
        header[HEADER_EFFECTS_VERTEX_COUNT] = vertices.min(self.max_effects_vertices) as f32;
        header[HEADER_MAX_SOUNDS] = self.max_sounds as f32;
        header[HEADER_SOUND_COUNT] = sounds.min(self.max_sounds) as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = events.min(self.max_events) as f32;
        header[HEADER_IRIS_RADIUS] = buffer.iris_radius.unwrap_or(-1.0);
        header[HEADER_SHAKE_X] = buffer.shake.x;
        header[HEADER_SHAKE_Y] = buffer.shake.y;
        header[HEADER_SILHOUETTE_ALPHA] = RenderBuffer::SILHOUETTE_ALPHA as f32;
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::layer::RenderLayer;
    use glam::Vec2;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());

        assert_eq!(layout.instance_data_offset, 16);
        assert_eq!(layout.effects_data_offset, 16 + 2048 * 8);
        assert_eq!(layout.sound_data_offset, layout.effects_data_offset + 16384 * 2);
        assert_eq!(layout.event_data_offset, layout.sound_data_offset + 32);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + 32 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn header_clamps_counts_to_capacity() {
        let layout = ProtocolLayout::new(2, 3, 1, 1);
        let mut buffer = RenderBuffer::new();
        for _ in 0..4 {
            buffer.push(RenderLayer::Actors, RenderInstance::default());
        }
        buffer.mark_silhouette_end();
        buffer.push_polygon([Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y]);
        buffer.iris_radius = Some(80.0);

        let header = layout.header(7, &buffer, 5, 0);

        assert_eq!(header[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(header[HEADER_INSTANCE_COUNT], 2.0);
        assert_eq!(header[HEADER_SILHOUETTE_END], 2.0);
        assert_eq!(header[HEADER_EFFECTS_VERTEX_COUNT], 3.0);
        assert_eq!(header[HEADER_SOUND_COUNT], 1.0);
        assert_eq!(header[HEADER_EVENT_COUNT], 0.0);
        assert_eq!(header[HEADER_IRIS_RADIUS], 80.0);
    }

    #[test]
    fn header_marks_missing_iris() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());
        let header = layout.header(0, &RenderBuffer::new(), 0, 0);
        assert_eq!(header[HEADER_IRIS_RADIUS], -1.0);
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
    }
}
