pub mod rig_bootstrap;
pub mod rig_builder;
