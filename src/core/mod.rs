pub mod catalog;
pub mod constants;
pub mod dispatcher;
pub mod selection;
pub mod settings;
pub mod transcript;
