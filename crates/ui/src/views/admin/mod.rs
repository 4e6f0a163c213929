mod actions;
mod components;
mod state;
mod view;

pub use view::AdminView;

#[cfg(test)]
pub(crate) use view::AdminTestHandles;

#[cfg(test)]
mod intent_smoke;
