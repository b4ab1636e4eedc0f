pub mod files;
pub mod settings;

pub use files::{atomic_write, ensure_nook_dir, init_local_nook, read_file, settings_file};
pub use settings::{
    load_settings, save_settings, Settings, MAX_ANIMATION_SPEED,
    MIN_ANIMATION_SPEED,
};
