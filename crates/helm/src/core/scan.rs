use std::collections::BTreeMap;
use std::fmt::Write;
use crate::core::event::EventKind;
use crate::world::ship::Ship;

/// "1 ton of Food", "12 tons of Food".
pub fn cargo_string(tons: i32, name: &str) -> String {
    if tons == 1 {
        format!("1 ton of {name}")
    } else {
        format!("{tons} tons of {name}")
    }
}

/// The report shown after the player scans `target`.
///
/// Outfit categories are listed in `category_order`; any category not in it
/// follows, alphabetically.
pub fn scan_report(kind: EventKind, target: &Ship, category_order: &[String]) -> String {
    let mut out = String::new();
    if kind.contains(EventKind::SCAN_CARGO) {
        write_cargo(&mut out, target);
    }
    if kind.contains(EventKind::SCAN_OUTFITS) {
        if target.attribute("inscrutable") != 0.0 {
            let _ = write!(out, "Your scanners cannot make any sense of this {}'s interior.", target.noun);
        } else {
            write_outfits(&mut out, target, category_order);
        }
    }
    out
}

fn write_cargo(out: &mut String, target: &Ship) {
    let header = format!("This {} is carrying:\n", target.noun);
    let mut first = true;

    for (name, &tons) in &target.cargo.commodities {
        if tons == 0 {
            continue;
        }
        if std::mem::take(&mut first) {
            out.push_str(&header);
        }
        let _ = writeln!(out, "\t{}", cargo_string(tons, name));
    }
    for stack in &target.cargo.outfits {
        if stack.count == 0 {
            continue;
        }
        if std::mem::take(&mut first) {
            out.push_str(&header);
        }
        let outfit = &stack.outfit;
        // Minable outfits are reported by weight.
        if outfit.installable < 0.0 {
            let tons = (f64::from(stack.count) * outfit.mass).ceil() as i32;
            let _ = writeln!(out, "\t{}", cargo_string(tons, &outfit.plural_name.to_lowercase()));
        } else {
            let _ = writeln!(out, "\t{} {}", stack.count, outfit.display_for(stack.count));
        }
    }

    if first {
        let _ = writeln!(out, "This {} is not carrying any cargo.", target.noun);
    }
}

fn write_outfits(out: &mut String, target: &Ship, category_order: &[String]) {
    if target.outfits.is_empty() {
        let _ = writeln!(out, "This {} is not equipped with any outfits.", target.noun);
    } else {
        let _ = writeln!(out, "This {} is equipped with:", target.noun);
    }

    let rank = |category: &str| {
        category_order
            .iter()
            .position(|c| c == category)
            .unwrap_or(category_order.len())
    };
    let mut by_category: BTreeMap<(usize, &str), BTreeMap<&str, i32>> = BTreeMap::new();
    for stack in &target.outfits {
        let category = stack.outfit.category.as_str();
        by_category
            .entry((rank(category), category))
            .or_default()
            .entry(stack.outfit.display_for(stack.count))
            .or_insert(stack.count);
    }

    for ((_, category), outfits) in &by_category {
        if outfits.is_empty() {
            continue;
        }
        let heading = if category.is_empty() { "Unknown" } else { category };
        let _ = writeln!(out, "\t{heading}");
        for (name, count) in outfits {
            if !name.is_empty() && *count > 0 {
                let _ = writeln!(out, "\t\t{count} {name}");
            }
        }
    }

    let carried = count_carried(target);
    if !carried.is_empty() {
        let _ = writeln!(out, "This {} is carrying:", target.noun);
        for (model, count) in &carried {
            if *count > 0 {
                let _ = writeln!(out, "\t{count} {model}");
            }
        }
    }
}

/// Ships in bays, by model. Once a model appears twice its count moves to
/// the plural name; the singular entry is left at -1 and not printed.
fn count_carried(target: &Ship) -> BTreeMap<&str, i32> {
    let mut count: BTreeMap<&str, i32> = BTreeMap::new();
    for occupant in target.bays.iter().filter_map(|bay| bay.occupant.as_ref()) {
        let singular = count.entry(occupant.model_name.as_str()).or_insert(0);
        if *singular == 0 {
            *singular += 1;
            continue;
        }
        let same_name = occupant.model_name == occupant.plural_model_name;
        if same_name {
            *singular += 1;
            continue;
        }
        let was_singular = *singular > 0;
        if was_singular {
            *singular = -1;
        }
        let plural = count.entry(occupant.plural_model_name.as_str()).or_insert(0);
        if was_singular {
            *plural = 1;
        }
        *plural += 1;
    }
    count
}
