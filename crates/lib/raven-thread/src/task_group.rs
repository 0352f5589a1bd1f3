use std::{panic, thread};

/// A fixed fan-out of scoped tasks followed by a join barrier.
///
/// Every input gets its own named thread. Tasks may borrow from the caller's stack,
/// since none of them can outlive [`TaskGroup::fan_out`].
pub struct TaskGroup {
    name: String,
}

impl TaskGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run `f(index, input)` for every input in parallel and block until all of them are done.
    /// Results are returned in input order.
    ///
    /// A panicking task is re-raised on the calling thread after the barrier.
    pub fn fan_out<I, T, R, F>(&self, inputs: I, f: F) -> Vec<R>
    where
        I: IntoIterator<Item = T>,
        T: Send,
        R: Send,
        F: Fn(usize, T) -> R + Sync,
    {
        let f = &f;

        let results: Vec<R> = thread::scope(|scope| {
            let handles: Vec<_> = inputs.into_iter()
                .enumerate()
                .map(|(index, input)| {
                    thread::Builder::new()
                        .name(format!("{} {}", self.name, index))
                        .spawn_scoped(scope, move || f(index, input))
                        .unwrap_or_else(|err| {
                            panic!("Failed to spawn task {} of {}! with {}", index, self.name, err)
                        })
                })
                .collect();

            handles.into_iter()
                .map(|handle| match handle.join() {
                    Ok(result) => result,
                    Err(payload) => panic::resume_unwind(payload),
                })
                .collect()
        });

        log::trace!("{}: {} tasks joined", self.name, results.len());
        results
    }
}
