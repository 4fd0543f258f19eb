//! Single-slot discovery notification.
//!
//! The shell arms a timeout with the token returned by [`ToastSlot::show`];
//! when it fires it only clears that same toast, so a manual close or a newer
//! discovery is never clobbered by a stale timer.

use std::rc::Rc;

use yew::Reducible;

use crate::catalog::Reward;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastSlot {
    current: Option<(u64, Reward)>,
    next_token: u64,
}

#[derive(Clone, Debug)]
pub enum ToastAction {
    Show(Reward),
    Expire(u64),
    Dismiss,
}

impl ToastSlot {
    pub fn show(&mut self, reward: Reward) -> u64 {
        self.next_token += 1;
        self.current = Some((self.next_token, reward));
        self.next_token
    }

    pub fn expire(&mut self, token: u64) {
        if self.token() == Some(token) {
            self.current = None;
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn visible(&self) -> Option<&Reward> {
        self.current.as_ref().map(|(_, r)| r)
    }

    pub fn token(&self) -> Option<u64> {
        self.current.as_ref().map(|(t, _)| *t)
    }
}

impl Reducible for ToastSlot {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        match action {
            ToastAction::Show(reward) => {
                new.show(reward);
            }
            ToastAction::Expire(token) => {
                if self.token() != Some(token) {
                    return self;
                }
                new.expire(token);
            }
            ToastAction::Dismiss => new.dismiss(),
        }
        Rc::new(new)
    }
}

/// Visibility flag with the same token-guarded expiry, for overlays that carry
/// no payload (the Konami celebration).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimedFlag {
    token: Option<u64>,
    next_token: u64,
}

#[derive(Clone, Copy, Debug)]
pub enum FlagAction {
    Raise,
    Expire(u64),
}

impl TimedFlag {
    pub fn raise(&mut self) -> u64 {
        self.next_token += 1;
        self.token = Some(self.next_token);
        self.next_token
    }

    pub fn expire(&mut self, token: u64) {
        if self.token == Some(token) {
            self.token = None;
        }
    }

    pub fn is_up(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<u64> {
        self.token
    }
}

impl Reducible for TimedFlag {
    type Action = FlagAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = *self;
        match action {
            FlagAction::Raise => {
                new.raise();
            }
            FlagAction::Expire(token) => {
                if self.token != Some(token) {
                    return self;
                }
                new.expire(token);
            }
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::hidden_rewards;

    #[test]
    fn expiry_clears_own_toast() {
        let mut slot = ToastSlot::default();
        let token = slot.show(hidden_rewards()[0].clone());
        slot.expire(token);
        assert!(slot.visible().is_none());
    }

    #[test]
    fn stale_expiry_keeps_newer_toast() {
        let rewards = hidden_rewards();
        let mut slot = ToastSlot::default();
        let first = slot.show(rewards[0].clone());
        let second = slot.show(rewards[1].clone());
        slot.expire(first);
        assert_eq!(slot.visible().map(|r| r.id), Some(rewards[1].id));
        assert_eq!(slot.token(), Some(second));
    }

    #[test]
    fn manual_dismiss_then_expiry_is_noop() {
        let mut slot = ToastSlot::default();
        let token = slot.show(hidden_rewards()[2].clone());
        slot.dismiss();
        slot.expire(token);
        assert!(slot.visible().is_none());
        // A toast shown after the dismissal gets a fresh token.
        let next = slot.show(hidden_rewards()[3].clone());
        assert_ne!(next, token);
    }

    #[test]
    fn reducer_skips_stale_expiry() {
        let slot = Rc::new(ToastSlot::default());
        let slot = slot.reduce(ToastAction::Show(hidden_rewards()[0].clone()));
        let slot = slot.reduce(ToastAction::Show(hidden_rewards()[1].clone()));
        let kept = slot.clone().reduce(ToastAction::Expire(1));
        assert!(Rc::ptr_eq(&slot, &kept));
        let cleared = kept.reduce(ToastAction::Expire(2));
        assert!(cleared.visible().is_none());
    }

    #[test]
    fn second_raise_outlives_first_timer() {
        let mut flag = TimedFlag::default();
        let first = flag.raise();
        let second = flag.raise();
        flag.expire(first);
        assert!(flag.is_up());
        flag.expire(second);
        assert!(!flag.is_up());
    }

    #[test]
    fn flag_reducer_ignores_stale_expiry() {
        let flag = Rc::new(TimedFlag::default());
        let flag = flag.reduce(FlagAction::Raise);
        let flag = flag.reduce(FlagAction::Raise);
        let kept = flag.clone().reduce(FlagAction::Expire(1));
        assert!(Rc::ptr_eq(&flag, &kept));
        assert!(kept.is_up());
        assert!(!kept.reduce(FlagAction::Expire(2)).is_up());
    }
}
