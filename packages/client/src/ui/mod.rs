//! UI layer: the lobby controller and the render model it maintains.

pub mod controller;
pub mod event;
pub mod view;

pub use controller::LobbyController;
pub use event::UserAction;
pub use view::LobbyView;
