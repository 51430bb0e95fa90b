//! Premium gating and the paywall modal

use super::modal::{ModalState, TargetedModal};
use super::Store;
use crate::i18n::{keys, Localizer};
use crate::reactive::{batch, Computed, Observable, ReadOnly};
use crate::types::{Notice, PremiumFeature};

/// Premium status is pushed in by the billing collaborator through
/// [`SubscriptionStore::set_premium`]; screens call
/// [`SubscriptionStore::request`] before using a gated feature.
pub struct SubscriptionStore {
    premium: Observable<bool>,
    paywall: TargetedModal<PremiumFeature>,
    gated: Computed<bool>,
}

impl Store for SubscriptionStore {
    const NAME: &'static str = "subscription";
}

impl SubscriptionStore {
    pub fn new() -> Self {
        let premium = Observable::new(false);
        let gated = Computed::from_observable(&premium, |premium| !premium);
        Self {
            premium,
            paywall: TargetedModal::new(),
            gated,
        }
    }

    /// Record the subscription status. Becoming premium dismisses the
    /// paywall.
    pub fn set_premium(&self, premium: bool) {
        tracing::debug!(store = Self::NAME, premium, "Premium status updated");
        batch(|| {
            self.premium.set(premium);
            if premium {
                self.paywall.close();
            }
        });
    }

    pub fn is_premium(&self) -> bool {
        self.premium.get()
    }

    pub fn premium(&self) -> ReadOnly<bool> {
        self.premium.read_only()
    }

    /// Whether premium features are locked
    pub fn gated(&self) -> bool {
        self.gated.get()
    }

    /// `true` when `feature` may be used right away. Otherwise the paywall
    /// opens for that feature and `false` is returned.
    pub fn request(&self, feature: PremiumFeature) -> bool {
        if !self.gated() {
            return true;
        }
        tracing::debug!(store = Self::NAME, feature = %feature, "Feature gated, showing paywall");
        self.paywall.open(feature);
        false
    }

    pub fn open_paywall(&self, feature: PremiumFeature) {
        tracing::debug!(store = Self::NAME, feature = %feature, "Paywall opened");
        self.paywall.open(feature);
    }

    pub fn close_paywall(&self) {
        tracing::debug!(store = Self::NAME, "Paywall closed");
        self.paywall.close();
    }

    pub fn paywall(&self) -> ReadOnly<ModalState<PremiumFeature>> {
        self.paywall.read_only()
    }

    pub fn is_paywall_open(&self) -> bool {
        self.paywall.is_open()
    }

    /// Localized paywall copy naming the feature that triggered it
    pub fn paywall_notice(&self, localizer: &dyn Localizer) -> Option<Notice> {
        if !self.paywall.is_open() {
            return None;
        }
        let feature = self.paywall.target()?;
        let label = localizer.translate(&feature.label_key(), &[]);
        Some(Notice {
            title: localizer.translate(keys::PAYWALL_TITLE, &[]),
            message: localizer.translate(keys::PAYWALL_MESSAGE, &[("feature", label.as_str())]),
        })
    }
}

impl Default for SubscriptionStore {
    fn default() -> Self {
        Self::new()
    }
}
