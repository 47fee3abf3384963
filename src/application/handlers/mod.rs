pub mod connectivity_watcher;
pub mod delivery_orchestrator;
