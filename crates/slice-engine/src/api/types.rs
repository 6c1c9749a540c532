use bytemuck::{Pod, Zeroable};

/// A sound event emitted by the game logic.
/// The numeric value maps to a manifest sound's `event_id` on the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

/// Sounds the simulation can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Sfx {
    Jump = 1,
    Dash = 2,
    Hit = 3,
    Shoot = 4,
    Ambience = 5,
    Coin = 6,
}

impl Sfx {
    /// Manifest key of the sound.
    pub fn key(self) -> &'static str {
        match self {
            Sfx::Jump => "jump",
            Sfx::Dash => "dash",
            Sfx::Hit => "hit",
            Sfx::Shoot => "shoot",
            Sfx::Ambience => "ambience",
            Sfx::Coin => "coin",
        }
    }
}

impl From<Sfx> for SoundEvent {
    fn from(sfx: Sfx) -> Self {
        SoundEvent(sfx as u32)
    }
}

/// A game event handed to the host each frame.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// `a` = level index.
    pub const LEVEL_LOADED: f32 = 1.0;
    /// `a` = death counter after the hit.
    pub const PLAYER_HIT: f32 = 2.0;
    /// `a` = enemies left.
    pub const ENEMY_KILLED: f32 = 3.0;
    /// `a` = coin total.
    pub const COIN_COLLECTED: f32 = 4.0;

    pub fn new(kind: f32, a: f32) -> Self {
        Self {
            kind,
            a,
            ..Default::default()
        }
    }
}
