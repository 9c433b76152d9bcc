// Tab content registry.
// - Each tab module owns only its own rendering behavior.
// - Race feature sub-tabs are added here alongside the character summary.
pub mod body_addons;
pub mod character;
