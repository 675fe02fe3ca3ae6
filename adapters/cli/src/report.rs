//! Text rendering of world events and end-of-session summaries.

use std::{fmt::Write as _, time::Duration};

use hex_city_core::{BuildingKind, Event};
use hex_city_world::query;

use crate::{
    scenario::PlannedPlacement,
    session::{PlacementOutcome, RunReport},
};

fn clock(duration: Duration) -> String {
    let seconds = duration.as_secs();
    format!("{}m{:02}s", seconds / 60, seconds % 60)
}

/// Single-line log record for an event.
pub(crate) fn describe(event: &Event) -> String {
    match event {
        Event::TimeAdvanced { dt, clock: now } => {
            format!("time advanced by {}s to {}", dt.as_secs(), clock(*now))
        }
        Event::IncomeAccrued { amount, total } => {
            format!("income +{amount:.2} points, total {total:.2}")
        }
        Event::BuildingPlaced {
            building,
            offer,
            kind,
            anchor,
        } => format!(
            "placed {kind} #{} at {anchor} from offer #{}",
            building.get(),
            offer.get()
        ),
        Event::ScoreAwarded { building, amount } => {
            format!("building #{} awarded {amount:.2} points", building.get())
        }
        Event::TimedBonusActivated { expires_at } => {
            format!("timed bonus active until {}", clock(*expires_at))
        }
        Event::TimedBonusExpired => "timed bonus expired".to_owned(),
        Event::PlacementRejected {
            offer,
            anchor,
            reason,
        } => format!("offer #{} rejected at {anchor}: {reason}", offer.get()),
        Event::OfferAdded { offer, kind } => format!("offer #{} added: {kind}", offer.get()),
        Event::OfferRemoved { offer, kind } => format!("offer #{} removed: {kind}", offer.get()),
        Event::OfferRotated { offer, rotation } => {
            format!("offer #{} rotated to {} degrees", offer.get(), rotation.degrees())
        }
        Event::QuotaExhausted { kind } => format!("{kind} quota exhausted"),
    }
}

fn describe_outcome(placement: &PlannedPlacement, outcome: PlacementOutcome) -> String {
    let target = format!("{} at {}", placement.kind, placement.anchor());
    match outcome {
        PlacementOutcome::Placed(building) => format!("{target}: placed as #{}", building.get()),
        PlacementOutcome::Rejected(reason) => format!("{target}: rejected, {reason}"),
        PlacementOutcome::NotOffered => format!("{target}: never offered"),
        PlacementOutcome::OffBoard => format!("{target}: outside the board"),
    }
}

/// Multi-line summary of a finished session.
pub(crate) fn summary(report: &RunReport) -> String {
    let world = report.session.world();
    let mut text = String::new();

    let _ = writeln!(text, "{}", query::welcome_banner(world));
    let _ = writeln!(text, "accrual: {}", query::config(world).accrual);
    let _ = writeln!(text, "clock: {}", clock(query::clock(world)));
    let _ = writeln!(text, "score: {:.2}", query::total_score(world));
    let _ = writeln!(text, "base income: {:.2} points/hour", query::hourly_income(world));
    if let Some(expiry) = query::timed_bonus_expiry(world) {
        let _ = writeln!(text, "timed bonus until: {}", clock(expiry));
    }

    let placements = report
        .outcomes
        .iter()
        .map(|(placement, outcome)| (placement, *outcome))
        .chain(
            report
                .never_offered
                .iter()
                .map(|placement| (placement, PlacementOutcome::NotOffered)),
        );
    let _ = writeln!(text, "placements:");
    for (placement, outcome) in placements {
        let _ = writeln!(text, "  {}", describe_outcome(placement, outcome));
    }

    let buildings = query::buildings(world);
    let _ = writeln!(text, "buildings ({}):", buildings.len());
    for building in &buildings {
        let _ = write!(
            text,
            "  #{} {} at {} placed {}",
            building.id.get(),
            building.kind,
            building.cells.first().map_or_else(String::new, ToString::to_string),
            clock(building.placed_at),
        );
        if building.kind == BuildingKind::Daisy {
            let _ = write!(text, ", daisy bonus {:.0}", building.daisy_bonus);
        }
        let _ = writeln!(text);
    }

    let offers = query::offers(world)
        .into_iter()
        .map(|offer| offer.kind.to_string())
        .collect::<Vec<_>>();
    let _ = writeln!(text, "offers ({}): {}", offers.len(), offers.join(", "));

    let quotas = BuildingKind::ALL
        .into_iter()
        .filter_map(|kind| {
            query::remaining_placements(world, kind)
                .remaining()
                .map(|left| format!("{kind} {left}"))
        })
        .collect::<Vec<_>>();
    let _ = writeln!(text, "remaining: {}", quotas.join(", "));
    text
}
