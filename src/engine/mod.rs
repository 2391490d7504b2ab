pub mod boundary;
pub mod commands;
pub mod history;
pub mod loss_analysis;
pub mod progression;
pub mod seed_ops;
pub mod session;
pub mod status_text;
pub mod view_model;
