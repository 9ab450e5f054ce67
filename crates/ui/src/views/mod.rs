mod goals;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use goals::{GoalsIntent, GoalsView};
pub use state::{ViewError, ViewState, count_or_zero, read_failed, view_state_from_resource};
