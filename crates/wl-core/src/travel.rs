//! Heuristic travel estimate between located appointments.
//!
//! Every leg costs the same flat charge. This is an upper bound on commute
//! time, not a routed distance.

use crate::event::ClassifiedEvent;

#[derive(Debug, Clone, Copy)]
enum Stop<'a> {
    Home,
    Visit(&'a ClassifiedEvent),
}

impl Stop<'_> {
    fn is_located(self) -> bool {
        match self {
            Self::Home => true,
            Self::Visit(event) => event.event.has_location(),
        }
    }
}

/// Number of chargeable legs for a day's visits, taken in the given order.
///
/// The route runs home, through every located visit, and back home. A leg
/// is chargeable only when both of its endpoints have a location.
pub fn travel_legs<'a, I>(ordered: I) -> usize
where
    I: IntoIterator<Item = &'a ClassifiedEvent>,
{
    let visits: Vec<Stop<'a>> = ordered
        .into_iter()
        .map(Stop::Visit)
        .filter(|s| s.is_located())
        .collect();
    if visits.is_empty() {
        return 0;
    }

    let mut route = Vec::with_capacity(visits.len() + 2);
    route.push(Stop::Home);
    route.extend(visits);
    route.push(Stop::Home);

    route
        .windows(2)
        .filter(|leg| leg[0].is_located() && leg[1].is_located())
        .count()
}

/// Travel minutes for a day's visits: `per_leg × legs`.
///
/// With `n` located visits this is `per_leg × (n + 1)`, or 0 when none
/// have a location. A negative charge is treated as zero.
pub fn estimate_travel_minutes<'a, I>(ordered: I, minutes_per_leg: i64) -> i64
where
    I: IntoIterator<Item = &'a ClassifiedEvent>,
{
    let legs = i64::try_from(travel_legs(ordered)).unwrap_or(i64::MAX);
    legs.saturating_mul(minutes_per_leg.max(0))
}
