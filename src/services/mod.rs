// Service module exports

pub mod agenda;
pub mod database;
pub mod event;
pub mod notification;
pub mod settings;
