/// Unit of work marshalled onto the UI-affine context.
pub type MainTask = Box<dyn FnOnce() + Send + 'static>;

/// The host's UI-affine execution context.
///
/// Every delegate callback is dispatched through it.
pub trait MainContext: Send + Sync {
    fn dispatch(&self, task: MainTask);
}
