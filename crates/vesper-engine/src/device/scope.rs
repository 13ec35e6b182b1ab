use crate::error::GraphicsStateError;

/// Runs `f` inside a validation error scope and returns its value together
/// with the error the scope captured, if any.
///
/// Scope resolution is synchronous on native backends; `block_on` only
/// drives the already-ready future.
pub(crate) fn capture_validation<T>(
    device: &wgpu::Device,
    f: impl FnOnce() -> T,
) -> (T, Option<wgpu::Error>) {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = f();
    let error = pollster::block_on(scope.pop());
    (value, error)
}

/// Validation scope spanning a whole setup phase.
///
/// Errors already captured by an inner scope (shader or pipeline creation)
/// do not reach it. Anything else raised between [`ErrorWatch::begin`] and
/// [`ErrorWatch::finish`] is reported once, as a [`GraphicsStateError`].
///
/// The watch is thread-bound, like the device's error-scope stack.
pub struct ErrorWatch {
    scope: wgpu::ErrorScopeGuard,
}

impl ErrorWatch {
    pub fn begin(device: &wgpu::Device) -> Self {
        Self {
            scope: device.push_error_scope(wgpu::ErrorFilter::Validation),
        }
    }

    /// Pops the scope and fails if any error is pending.
    pub fn finish(self) -> Result<(), GraphicsStateError> {
        match pollster::block_on(self.scope.pop()) {
            None => Ok(()),
            Some(err) => {
                log::error!("graphics error pending after setup: {err}");
                Err(GraphicsStateError(err))
            }
        }
    }
}
