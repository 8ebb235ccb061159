//! Meal anchors. Meal timing is a secondary time cue for the body clock,
//! so meals are pinned to the day's wake and bed times.

use crate::error::Result;
use crate::model::{Direction, Meal, MealKind};

use super::{DayFrame, PlanContext, add_minutes};

const BREAKFAST_AFTER_WAKE_MINUTES: i64 = 30;
const LUNCH_AFTER_WAKE_MINUTES: i64 = 5 * 60;
const DINNER_BEFORE_BED_MINUTES: i64 = 3 * 60;

/// Breakfast, lunch, and dinner for `frame`. Meals that fall before
/// arrival on day 1 are left out, as is a dinner that would not come
/// after lunch.
pub fn meals(ctx: &PlanContext, frame: &DayFrame) -> Result<Vec<Meal>> {
    let direction = ctx.shift.direction;
    let breakfast = add_minutes(&frame.wake, BREAKFAST_AFTER_WAKE_MINUTES)?;
    let lunch = add_minutes(&frame.wake, LUNCH_AFTER_WAKE_MINUTES)?;
    let dinner = add_minutes(&frame.bed, -DINNER_BEFORE_BED_MINUTES)?;

    let mut meals = vec![
        Meal {
            kind: MealKind::Breakfast,
            time: breakfast,
            guidance: guidance(direction, MealKind::Breakfast).to_string(),
        },
        Meal {
            kind: MealKind::Lunch,
            time: lunch.clone(),
            guidance: guidance(direction, MealKind::Lunch).to_string(),
        },
    ];
    if dinner > lunch {
        meals.push(Meal {
            kind: MealKind::Dinner,
            time: dinner,
            guidance: guidance(direction, MealKind::Dinner).to_string(),
        });
    }

    meals.retain(|m| ctx.after_arrival(&m.time));
    Ok(meals)
}

fn guidance(direction: Direction, kind: MealKind) -> &'static str {
    match (direction, kind) {
        (Direction::East, MealKind::Breakfast) => {
            "Eat a protein-rich breakfast soon after waking, even if you are not hungry."
        }
        (Direction::West, MealKind::Breakfast) => {
            "Keep breakfast light; your body thinks it is later in the day."
        }
        (_, MealKind::Breakfast) => "Eat breakfast at your usual time.",
        (_, MealKind::Lunch) => "Eat lunch on local time to anchor the middle of the day.",
        (Direction::East, MealKind::Dinner) => {
            "Keep dinner light and early to make falling asleep easier."
        }
        (Direction::West, MealKind::Dinner) => {
            "A carbohydrate-forward dinner can help you stay up until local bedtime."
        }
        (Direction::None, MealKind::Dinner) => "Eat dinner at your usual time.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::schedule::sleep::frame;
    use crate::schedule::testing::{london_to_new_york, taipei_to_vancouver};

    #[test]
    fn meals_anchor_to_wake_and_bed() {
        let ctx = taipei_to_vancouver();
        let frame = frame(&ctx, 2).unwrap();
        let meals = meals(&ctx, &frame).unwrap();

        assert_eq!(meals.len(), 3);
        assert_eq!(meals[0].kind, MealKind::Breakfast);
        assert_eq!(meals[0].time, add_minutes(&frame.wake, 30).unwrap());
        assert_eq!(meals[2].time, add_minutes(&frame.bed, -180).unwrap());
        assert!(meals[0].guidance.contains("protein"));
    }

    #[test]
    fn meals_before_landing_are_dropped() {
        // Lands 13:00; wake is 04:00, so breakfast and lunch (09:00) are in the air.
        let ctx = london_to_new_york();
        let frame = frame(&ctx, 1).unwrap();
        let meals = meals(&ctx, &frame).unwrap();

        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].kind, MealKind::Dinner);
        assert!(meals[0].guidance.contains("carbohydrate"));
    }
}
