use slice_engine::{
    EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue, ProtocolLayout,
    RenderBuffer, RenderContext, HEADER_FLOATS,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    /// Stands in for `input` on the second and later steps of a frame.
    no_input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    header: [f32; HEADER_FLOATS],
    /// Layer batches flattened as (layer, start, end) triples.
    batch_buffer: Vec<f32>,
    /// Flat buffer of sound event IDs for host reads.
    sound_buffer: Vec<u8>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep =
            FixedTimestep::new(config.fixed_dt).with_max_steps(config.max_steps_per_frame);
        let layout = ProtocolLayout::from_config(&config);
        let sound_buffer = Vec::with_capacity(config.max_sounds);

        Self {
            game,
            ctx: EngineContext::with_seed(config.seed),
            input: InputQueue::new(),
            no_input: InputQueue::new(),
            render_buffer: RenderBuffer::new(),
            timestep,
            layout,
            config,
            initialized: false,
            header: [0.0; HEADER_FLOATS],
            batch_buffer: Vec::new(),
            sound_buffer,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.game.init(&mut self.ctx);
        self.initialized = true;
        log::debug!(
            "runner ready: {} floats of frame data",
            self.layout.buffer_total_floats
        );
        self.render();
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one display frame: as many fixed steps as `dt` covers, then render.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        // Events are applied once, on the first step that runs.
        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            let input = if step == 0 { &self.input } else { &self.no_input };
            self.game.update(&mut self.ctx, input);
        }
        if steps > 0 {
            self.input.clear();
        }

        self.render();
    }

    fn render(&mut self) {
        self.render_buffer.clear();
        {
            let mut render_ctx = RenderContext {
                engine: &self.ctx,
                render_buffer: &mut self.render_buffer,
            };
            self.game.render(&mut render_ctx);
        }

        self.batch_buffer.clear();
        for batch in &self.render_buffer.batches {
            self.batch_buffer.extend([
                batch.layer.as_u8() as f32,
                batch.start as f32,
                batch.end as f32,
            ]);
        }

        self.sound_buffer.clear();
        for sound in self.ctx.sounds.iter().take(self.config.max_sounds) {
            self.sound_buffer.push(sound.0 as u8);
        }

        self.header = self.layout.header(
            self.timestep.ticks(),
            &self.render_buffer,
            self.ctx.sounds.len(),
            self.ctx.events.len(),
        );
    }

    // ---- Pointer accessors for host reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count().min(self.config.max_instances as u32)
    }

    pub fn backdrop_end(&self) -> u32 {
        self.render_buffer.backdrop_end
    }

    pub fn silhouette_end(&self) -> u32 {
        self.render_buffer.silhouette_end
    }

    pub fn layer_batches_ptr(&self) -> *const f32 {
        self.batch_buffer.as_ptr()
    }

    pub fn layer_batch_count(&self) -> u32 {
        self.render_buffer.batches.len() as u32
    }

    pub fn effects_ptr(&self) -> *const f32 {
        self.render_buffer.effects_ptr()
    }

    pub fn effects_vertex_count(&self) -> u32 {
        (self.render_buffer.effects_len() / 2).min(self.config.max_effects_vertices as u32)
    }

    /// Iris radius in display pixels, or -1 when no transition is showing.
    pub fn iris_radius(&self) -> f32 {
        self.render_buffer.iris_radius.unwrap_or(-1.0)
    }

    pub fn shake_x(&self) -> f32 {
        self.render_buffer.shake.x
    }

    pub fn shake_y(&self) -> f32 {
        self.render_buffer.shake.y
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len().min(self.config.max_events) as u32
    }

    pub fn display_width(&self) -> f32 {
        self.config.display_width
    }

    pub fn display_height(&self) -> f32 {
        self.config.display_height
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_effects_vertices(&self) -> u32 {
        self.layout.max_effects_vertices as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn game(&self) -> &G {
        &self.game
    }
}
