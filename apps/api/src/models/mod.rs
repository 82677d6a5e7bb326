pub mod alarm;
pub mod chat;
pub mod diagnosis;
pub mod recommendation;
pub mod sensor;
pub mod user;
