// Domain layer - Core clipping logic

pub mod model;
pub mod rules;
