/// Errors returned for lifecycle calls that are invalid in the controller's current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("controller is already attached to a scroll container")]
    AlreadyAttached,
    #[error("controller is not attached to a scroll container")]
    NotAttached,
}
