use std::cell::RefCell;
use std::rc::Rc;

use super::state::WizardState;

/// Handle through which the async drivers reach the wizard state.
///
/// Implementations must not hold a borrow across an `.await`; the drivers only
/// ever touch the state inside the closures passed to `read`/`update`.
pub trait WizardStore {
    fn read<R>(&self, f: impl FnOnce(&WizardState) -> R) -> R;

    fn update<R>(&self, f: impl FnOnce(&mut WizardState) -> R) -> R;

    /// `false` once the owning view has been torn down. Results arriving after
    /// that point are dropped instead of written to dead state.
    fn is_live(&self) -> bool {
        true
    }
}

impl WizardStore for RefCell<WizardState> {
    fn read<R>(&self, f: impl FnOnce(&WizardState) -> R) -> R {
        f(&self.borrow())
    }

    fn update<R>(&self, f: impl FnOnce(&mut WizardState) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

impl<T: WizardStore> WizardStore for Rc<T> {
    fn read<R>(&self, f: impl FnOnce(&WizardState) -> R) -> R {
        self.as_ref().read(f)
    }

    fn update<R>(&self, f: impl FnOnce(&mut WizardState) -> R) -> R {
        self.as_ref().update(f)
    }

    fn is_live(&self) -> bool {
        self.as_ref().is_live()
    }
}

/// Store standing in for a mounted view that the test can close
#[cfg(test)]
pub(crate) struct ViewStore {
    state: RefCell<WizardState>,
    mounted: std::cell::Cell<bool>,
}

#[cfg(test)]
impl ViewStore {
    pub(crate) fn new(state: WizardState) -> Self {
        Self {
            state: RefCell::new(state),
            mounted: std::cell::Cell::new(true),
        }
    }

    /// Same teardown the wizard view runs when it is dropped
    pub(crate) fn unmount(&self) {
        self.mounted.set(false);
        self.state.borrow_mut().invalidate_pending();
    }

    pub(crate) fn snapshot(&self) -> WizardState {
        self.state.borrow().clone()
    }
}

#[cfg(test)]
impl WizardStore for ViewStore {
    fn read<R>(&self, f: impl FnOnce(&WizardState) -> R) -> R {
        f(&self.state.borrow())
    }

    fn update<R>(&self, f: impl FnOnce(&mut WizardState) -> R) -> R {
        f(&mut self.state.borrow_mut())
    }

    fn is_live(&self) -> bool {
        self.mounted.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::config::WizardConfig;
    use crate::wizard::types::WizardAction;

    #[test]
    fn test_shared_store_sees_updates() {
        let store = Rc::new(RefCell::new(WizardState::new(WizardConfig::default())));
        let handle = store.clone();

        handle.update(|state| state.reduce_in_place(WizardAction::SetName("Orders".into())));
        assert_eq!(store.read(|state| state.form_data().name.clone()), "Orders");
        assert!(store.is_live());
    }

    #[test]
    fn test_unmounted_view_is_not_live() {
        let store = ViewStore::new(WizardState::new(WizardConfig::default()));
        assert!(store.is_live());
        store.unmount();
        assert!(!store.is_live());
    }
}
