mod components;
mod view;

pub use view::{GoalsIntent, GoalsView};

#[cfg(test)]
pub(crate) use view::GoalsTestHandles;
