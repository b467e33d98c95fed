//! Included checked-baggage allowance, normalized to a bag count and pounds.

use offer_client::providers::amadeus::response::CheckedBags;

/// Pounds per kilogram.
pub const KG_TO_LBS: f64 = 2.20462262185;

/// Normalized allowance for one leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BaggageAllowance {
    pub num_bags: i32,
    pub lbs: Option<i32>,
}

/// Converts an upstream allowance.
///
/// Without a `quantity` the allowance is `0` bags of unknown weight, even if a
/// weight is given. With a quantity, a weight in `KG` is converted to pounds and
/// any weight is floored to whole pounds. The unit is matched without regard to
/// case (`kg` counts as `KG`); any other unit, or none, is taken as pounds.
pub fn normalize_checked_bags(bags: Option<&CheckedBags>) -> BaggageAllowance {
    let Some(bags) = bags else {
        return BaggageAllowance::default();
    };
    let Some(quantity) = bags.quantity else {
        return BaggageAllowance::default();
    };

    let lbs = bags.weight.map(|weight| {
        let pounds = if is_kilograms(bags.weight_unit.as_deref()) {
            weight * KG_TO_LBS
        } else {
            weight
        };
        pounds.floor() as i32
    });

    BaggageAllowance {
        num_bags: quantity,
        lbs,
    }
}

fn is_kilograms(unit: Option<&str>) -> bool {
    unit.is_some_and(|u| u.eq_ignore_ascii_case("KG"))
}
