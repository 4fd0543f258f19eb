pub mod app;
pub mod hub;
pub mod konami_overlay;
pub mod reward_toast;
pub mod rewards_panel;
