//! Pending offers and the per-kind placement quotas they draw from.

use std::collections::BTreeMap;

use hex_city_core::{BuildingKind, Event, OfferId, OfferSnapshot, Quota, Rotation};

/// Kinds offered when a world is created.
const INITIAL_OFFERS: [BuildingKind; 4] = [
    BuildingKind::Bank,
    BuildingKind::School,
    BuildingKind::Apartment,
    BuildingKind::Daisy,
];

/// Pending building waiting in the pool.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Offer {
    pub(crate) id: OfferId,
    pub(crate) kind: BuildingKind,
    pub(crate) rotation: Rotation,
}

/// Ordered offers plus the remaining quota shared by all offers of a kind.
#[derive(Debug)]
pub(crate) struct AvailabilityPool {
    offers: Vec<Offer>,
    remaining: BTreeMap<BuildingKind, Quota>,
    next_offer_id: OfferId,
}

impl AvailabilityPool {
    /// Creates the pool with full quotas and the opening offers.
    pub(crate) fn new() -> Self {
        let mut pool = Self {
            offers: Vec::new(),
            remaining: BuildingKind::ALL
                .into_iter()
                .map(|kind| (kind, kind.quota()))
                .collect(),
            next_offer_id: OfferId::new(0),
        };
        for kind in INITIAL_OFFERS {
            let _ = pool.push(kind);
        }
        pool
    }

    pub(crate) fn offer(&self, id: OfferId) -> Option<&Offer> {
        self.offers.iter().find(|offer| offer.id == id)
    }

    pub(crate) fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub(crate) fn remaining(&self, kind: BuildingKind) -> Quota {
        self.remaining
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.quota())
    }

    pub(crate) fn snapshot(&self, offer: &Offer) -> OfferSnapshot {
        OfferSnapshot {
            id: offer.id,
            kind: offer.kind,
            rotation: offer.rotation,
            remaining: self.remaining(offer.kind),
        }
    }

    /// Appends one offer per kind that still has quota; other kinds are
    /// dropped without notice.
    pub(crate) fn spawn(&mut self, kinds: &[BuildingKind], out_events: &mut Vec<Event>) {
        for kind in kinds {
            if !self.remaining(*kind).is_available() {
                continue;
            }
            let offer = self.push(*kind);
            out_events.push(Event::OfferAdded {
                offer,
                kind: *kind,
            });
        }
    }

    /// Removes a placed offer and charges its kind's quota.
    ///
    /// A limited kind with placements left is offered again; once its
    /// quota reaches zero every remaining offer of the kind is withdrawn.
    pub(crate) fn consume(&mut self, id: OfferId, out_events: &mut Vec<Event>) {
        let Some(index) = self.offers.iter().position(|offer| offer.id == id) else {
            return;
        };
        let offer = self.offers.remove(index);
        out_events.push(Event::OfferRemoved {
            offer: offer.id,
            kind: offer.kind,
        });

        let quota = self.remaining(offer.kind);
        let Quota::Limited(_) = quota else {
            return;
        };

        let left = quota.consume_one();
        let _ = self.remaining.insert(offer.kind, left);

        if left.is_available() {
            let replacement = self.push(offer.kind);
            out_events.push(Event::OfferAdded {
                offer: replacement,
                kind: offer.kind,
            });
            return;
        }

        let kind = offer.kind;
        for withdrawn in self.offers.iter().filter(|offer| offer.kind == kind) {
            out_events.push(Event::OfferRemoved {
                offer: withdrawn.id,
                kind,
            });
        }
        self.offers.retain(|offer| offer.kind != kind);
        out_events.push(Event::QuotaExhausted { kind });
    }

    /// Turns the offer by one step, returning its new orientation.
    pub(crate) fn rotate(&mut self, id: OfferId) -> Option<Rotation> {
        let offer = self.offers.iter_mut().find(|offer| offer.id == id)?;
        offer.rotation = offer.rotation.turned();
        Some(offer.rotation)
    }

    fn push(&mut self, kind: BuildingKind) -> OfferId {
        let id = self.next_offer_id;
        self.next_offer_id = OfferId::new(id.get().saturating_add(1));
        self.offers.push(Offer {
            id,
            kind,
            rotation: Rotation::default(),
        });
        id
    }
}
