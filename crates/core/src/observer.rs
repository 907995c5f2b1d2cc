/// Receives engine events and decides how a run should proceed.
///
/// The propagator and the cavity driver emit an event after every step. An
/// observer can record the event (to keep an intermediate trajectory), log it,
/// or return `Some(action)` to steer the engine. Returning `None` lets the run
/// continue unchanged.
///
/// Closures of the form `FnMut(&E) -> Option<A>` are observers, and `()` is
/// the observer that ignores everything.
pub trait Observer<E, A> {
    /// Observes an event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Halt {
        Now,
    }

    fn drive<Obs: Observer<usize, Halt>>(mut observer: Obs, steps: usize) -> usize {
        for step in 0..steps {
            if observer.observe(&step) == Some(Halt::Now) {
                return step;
            }
        }
        steps
    }

    #[test]
    fn unit_observer_never_acts() {
        assert_eq!(drive((), 7), 7);
    }

    #[test]
    fn closure_can_record_and_halt() {
        let mut seen = Vec::new();
        let stopped_at = drive(
            |step: &usize| {
                seen.push(*step);
                (*step == 3).then_some(Halt::Now)
            },
            10,
        );

        assert_eq!(stopped_at, 3);
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }
}
