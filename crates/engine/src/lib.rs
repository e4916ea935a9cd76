//! Resolution engine - swap, cascade and turn handling
//!
//! Everything in this crate may suspend on the presentation layer. The
//! engine never draws or plays anything itself: it calls a [`Presenter`]
//! and awaits each animation before mutating the board further.
//!
//! - [`resolve`]: swap validation, revert, and the pop/refill cascade
//! - [`selection`]: the two-pick turn state machine and its re-entrancy guard
//! - [`game`]: `Game`, the object a host constructs once and feeds picks to
//! - [`session`]: a host loop that drops picks arriving mid-cycle
//! - [`presenter`]: the collaborator trait plus null, recording and channel presenters
//! - [`config`]: startup configuration from defaults, env vars and JSON

pub mod config;
pub mod game;
pub mod presenter;
pub mod resolve;
pub mod selection;
pub mod session;

pub use tile_match_core as core;
pub use tile_match_types as types;

pub use config::{CatalogEntry, ConfigError, GameConfig};
pub use game::{Game, PickResponse};
pub use presenter::{
    Animation, AnimationRequest, ChannelPresenter, NullPresenter, Presenter, PresenterCall,
    PresenterEvent, RecordingPresenter,
};
pub use resolve::{CascadeReport, Engine, PopRecord, SwapOutcome};
pub use selection::{PickOutcome, Selection};
pub use session::{run_session, run_session_with, SessionSummary};
