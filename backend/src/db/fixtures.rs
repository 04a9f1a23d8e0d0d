//! Demo workshop data used to seed a fresh store.

use chrono::NaiveDate;

use crate::db::repositories::StoreSnapshot;
use crate::models::{Coach, CoachId, CoachStatus, Material, MaterialId, Ownership, UsageEntry};

type MaterialRow = (&'static str, &'static str, &'static str, &'static str, u32, u32, &'static str, Ownership);

const MATERIALS: [MaterialRow; 6] = [
    ("mat-001", "Brake Pads", "BP001", "set", 100, 20, "Standard issue brake pads.", Ownership::Railway),
    ("mat-002", "Seat Covers", "SC001", "piece", 200, 50, "Fabric seat covers.", Ownership::Sswpi),
    ("mat-003", "Window Panes", "WP001", "piece", 50, 10, "Double-glazed window panes.", Ownership::Railway),
    ("mat-004", "Flooring Material", "FM001", "sqm", 150, 30, "Anti-skid flooring.", Ownership::Sswpi),
    ("mat-005", "Lighting Fixtures", "LF001", "piece", 300, 50, "LED lighting fixtures.", Ownership::Railway),
    ("mat-006", "Welding Rod", "WR001", "piece", 500, 100, "General purpose welding rods.", Ownership::Railway),
];

struct CoachRow {
    id: &'static str,
    number: &'static str,
    offered: (i32, u32, u32),
    work_types: &'static [&'static str],
    usage: &'static [(&'static str, u64, (i32, u32, u32))],
}

const COACHES: [CoachRow; 6] = [
    CoachRow {
        id: "coach-001",
        number: "C-101",
        offered: (2024, 5, 1),
        work_types: &["General Overhaul"],
        usage: &[("mat-001", 8, (2024, 5, 10)), ("mat-002", 40, (2024, 5, 12))],
    },
    CoachRow {
        id: "coach-002",
        number: "C-102",
        offered: (2024, 5, 15),
        work_types: &["Interior Refurbishment"],
        usage: &[("mat-002", 60, (2024, 5, 20)), ("mat-004", 15, (2024, 5, 22))],
    },
    CoachRow {
        id: "coach-003",
        number: "C-103",
        offered: (2024, 6, 1),
        work_types: &["Exterior Painting"],
        usage: &[("mat-005", 25, (2024, 6, 5))],
    },
    CoachRow {
        id: "coach-004",
        number: "C-104",
        offered: (2024, 6, 10),
        work_types: &["General Overhaul"],
        usage: &[
            ("mat-001", 8, (2024, 6, 15)),
            ("mat-003", 4, (2024, 6, 16)),
            ("mat-005", 10, (2024, 6, 18)),
        ],
    },
    CoachRow {
        id: "coach-005",
        number: "C-201",
        offered: (2024, 6, 20),
        work_types: &["Wheelset Replacement"],
        usage: &[("mat-001", 4, (2024, 6, 25))],
    },
    CoachRow {
        id: "coach-006",
        number: "C-202",
        offered: (2024, 7, 1),
        work_types: &["Interior Refurbishment", "Head Stock Repair"],
        usage: &[
            ("mat-002", 25, (2024, 7, 5)),
            ("mat-004", 10, (2024, 7, 6)),
            ("mat-006", 50, (2024, 7, 8)),
        ],
    },
];

fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Six materials and six active coaches with recorded usage.
pub fn demo_snapshot() -> StoreSnapshot {
    let materials = MATERIALS
        .iter()
        .map(|&(id, name, code, unit, stock, min, description, ownership)| Material {
            id: MaterialId::new(id),
            name: name.to_string(),
            material_code: code.to_string(),
            unit: unit.to_string(),
            stock_quantity: Some(stock),
            min_stock_level: Some(min),
            description: Some(description.to_string()),
            ownership,
        })
        .collect();

    let coaches = COACHES
        .iter()
        .map(|row| {
            let mut materials: Vec<UsageEntry> = row
                .usage
                .iter()
                .map(|&(material_id, quantity, day)| UsageEntry::new(material_id, quantity, ymd(day)))
                .collect();
            materials.sort_by(|a, b| b.date.cmp(&a.date));

            Coach {
                id: CoachId::new(row.id),
                coach_number: row.number.to_string(),
                offered_date: ymd(row.offered),
                work_types: row.work_types.iter().map(|w| w.to_string()).collect(),
                notes: None,
                materials,
                status: CoachStatus::Active,
                completion_date: None,
                revision: 0,
            }
        })
        .collect();

    StoreSnapshot {
        coaches,
        materials,
        holidays: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_snapshot_is_consistent() {
        let store = demo_snapshot();
        assert_eq!(store.materials.len(), 6);
        assert_eq!(store.coaches.len(), 6);
        assert!(store.coaches.iter().all(Coach::is_active));

        // every usage row points at a seeded material and is newest-first
        for coach in &store.coaches {
            assert!(coach
                .materials
                .iter()
                .all(|u| store.materials.iter().any(|m| m.id == u.material_id)));
            assert!(coach.materials.windows(2).all(|w| w[0].date >= w[1].date));
        }
    }
}
