//! Material-usage ledger.
//!
//! Usage entries of a coach are keyed by `(material_id, date)`. Merging a
//! submission sums quantities onto matching entries instead of duplicating
//! rows. The aggregate views join entries against the material catalogue and
//! tolerate dangling material references.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Material, MaterialId, Ownership, UsageEntry};

/// Display name used when a usage entry references an unknown material.
pub const UNKNOWN_MATERIAL: &str = "Unknown";

/// One candidate row of a usage submission.
///
/// Rows left incomplete in the form (no material, non-positive quantity) are
/// dropped by [`merge_usage`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedUsage {
    #[serde(default)]
    pub material_id: MaterialId,
    #[serde(default)]
    pub quantity: i64,
    pub date: NaiveDate,
}

impl ProposedUsage {
    pub fn new(material_id: impl Into<MaterialId>, quantity: i64, date: NaiveDate) -> Self {
        Self {
            material_id: material_id.into(),
            quantity,
            date,
        }
    }

    /// Quantity as a stored amount, or `None` for rows to drop.
    fn accepted_quantity(&self) -> Option<u64> {
        if self.material_id.is_blank() {
            return None;
        }
        u64::try_from(self.quantity).ok().filter(|q| *q > 0)
    }
}

/// Merge a submission into the existing usage history of a coach.
///
/// Valid proposed rows are folded in submission order: a row whose material and
/// day match an entry (existing or added earlier in the same batch) adds to its
/// quantity, any other row is appended. The result is sorted newest day first.
/// The merge is additive, so applying the same batch twice doubles quantities.
pub fn merge_usage(existing: &[UsageEntry], proposed: &[ProposedUsage]) -> Vec<UsageEntry> {
    let mut merged = existing.to_vec();

    for row in proposed {
        let Some(quantity) = row.accepted_quantity() else {
            continue;
        };
        match merged
            .iter_mut()
            .find(|e| e.material_id == row.material_id && e.date == row.date)
        {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(quantity),
            None => merged.push(UsageEntry::new(row.material_id.clone(), quantity, row.date)),
        }
    }

    merged.sort_by(|a, b| b.date.cmp(&a.date));
    merged
}

/// Usage entry joined with its material for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLine {
    pub material_id: MaterialId,
    pub material_name: String,
    pub unit: String,
    pub ownership: Option<Ownership>,
    pub quantity: u64,
    pub date: NaiveDate,
}

/// Join entries with the catalogue, substituting a placeholder for unknown materials.
pub fn resolve_usage(entries: &[UsageEntry], materials: &[Material]) -> Vec<UsageLine> {
    let catalogue: HashMap<&MaterialId, &Material> =
        materials.iter().map(|m| (&m.id, m)).collect();

    entries
        .iter()
        .map(|entry| match catalogue.get(&entry.material_id) {
            Some(material) => UsageLine {
                material_id: entry.material_id.clone(),
                material_name: material.name.clone(),
                unit: material.unit.clone(),
                ownership: Some(material.ownership),
                quantity: entry.quantity,
                date: entry.date,
            },
            None => UsageLine {
                material_id: entry.material_id.clone(),
                material_name: UNKNOWN_MATERIAL.to_string(),
                unit: String::new(),
                ownership: None,
                quantity: entry.quantity,
                date: entry.date,
            },
        })
        .collect()
}

/// Quantities consumed per owning party.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipTotals {
    pub railway: u64,
    pub sswpi: u64,
    /// Entries whose material is no longer in the catalogue.
    pub unattributed: u64,
}

pub fn totals_by_ownership(entries: &[UsageEntry], materials: &[Material]) -> OwnershipTotals {
    let owners: HashMap<&MaterialId, Ownership> =
        materials.iter().map(|m| (&m.id, m.ownership)).collect();

    entries
        .iter()
        .fold(OwnershipTotals::default(), |mut totals, entry| {
            let bucket = match owners.get(&entry.material_id) {
                Some(Ownership::Railway) => &mut totals.railway,
                Some(Ownership::Sswpi) => &mut totals.sswpi,
                None => &mut totals.unattributed,
            };
            *bucket = bucket.saturating_add(entry.quantity);
            totals
        })
}

/// Total quantity of one material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialTotal {
    pub material_id: MaterialId,
    pub quantity: u64,
}

/// Quantity per material, in order of first appearance.
pub fn totals_by_material(entries: &[UsageEntry]) -> Vec<MaterialTotal> {
    let mut totals: Vec<MaterialTotal> = Vec::new();
    for entry in entries {
        match totals.iter_mut().find(|t| t.material_id == entry.material_id) {
            Some(total) => total.quantity = total.quantity.saturating_add(entry.quantity),
            None => totals.push(MaterialTotal {
                material_id: entry.material_id.clone(),
                quantity: entry.quantity,
            }),
        }
    }
    totals
}

/// Total quantity recorded within one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyUsage {
    pub year: i32,
    /// 1 = January
    pub month: u32,
    pub quantity: u64,
}

/// Quantity per calendar month, oldest month first.
pub fn totals_by_month(entries: &[UsageEntry]) -> Vec<MonthlyUsage> {
    let mut months: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for entry in entries {
        let slot = months
            .entry((entry.date.year(), entry.date.month()))
            .or_default();
        *slot = slot.saturating_add(entry.quantity);
    }
    months
        .into_iter()
        .map(|((year, month), quantity)| MonthlyUsage {
            year,
            month,
            quantity,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn material(id: &str, name: &str, ownership: Ownership) -> Material {
        Material {
            id: MaterialId::new(id),
            name: name.to_string(),
            material_code: format!("{}-code", id),
            unit: "piece".to_string(),
            stock_quantity: None,
            min_stock_level: None,
            description: None,
            ownership,
        }
    }

    #[test]
    fn test_merge_into_empty_history() {
        let merged = merge_usage(&[], &[ProposedUsage::new("mat-a", 3, date(2024, 5, 10))]);
        assert_eq!(merged, vec![UsageEntry::new("mat-a", 3, date(2024, 5, 10))]);
    }

    #[test]
    fn test_same_key_sums_in_either_order() {
        let day = date(2024, 5, 10);
        let first = merge_usage(&[], &[ProposedUsage::new("mat-a", 3, day)]);
        let forward = merge_usage(&first, &[ProposedUsage::new("mat-a", 2, day)]);

        let first = merge_usage(&[], &[ProposedUsage::new("mat-a", 2, day)]);
        let backward = merge_usage(&first, &[ProposedUsage::new("mat-a", 3, day)]);

        assert_eq!(forward, vec![UsageEntry::new("mat-a", 5, day)]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_same_key_within_one_batch_coalesces() {
        let day = date(2024, 5, 10);
        let merged = merge_usage(
            &[UsageEntry::new("mat-a", 1, day)],
            &[
                ProposedUsage::new("mat-b", 4, day),
                ProposedUsage::new("mat-b", 6, day),
                ProposedUsage::new("mat-a", 2, day),
            ],
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], UsageEntry::new("mat-a", 3, day));
        assert_eq!(merged[1], UsageEntry::new("mat-b", 10, day));
    }

    #[test]
    fn test_reapplying_batch_doubles_quantity() {
        let batch = vec![ProposedUsage::new("mat-a", 4, date(2024, 5, 10))];
        let once = merge_usage(&[], &batch);
        let twice = merge_usage(&once, &batch);
        assert_eq!(twice.len(), 1);
        assert_eq!(twice[0].quantity, 8);
    }

    #[test]
    fn test_different_days_stay_separate() {
        let merged = merge_usage(
            &[UsageEntry::new("mat-a", 1, date(2024, 5, 10))],
            &[ProposedUsage::new("mat-a", 1, date(2024, 5, 11))],
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_incomplete_rows_are_dropped() {
        let day = date(2024, 5, 10);
        let merged = merge_usage(
            &[],
            &[
                ProposedUsage::new("", 5, day),
                ProposedUsage::new("   ", 5, day),
                ProposedUsage::new("mat-a", 0, day),
                ProposedUsage::new("mat-a", -3, day),
                ProposedUsage::new("mat-b", 2, day),
            ],
        );
        assert_eq!(merged, vec![UsageEntry::new("mat-b", 2, day)]);
    }

    #[test]
    fn test_only_invalid_rows_leave_history_unchanged() {
        let existing = vec![UsageEntry::new("mat-a", 1, date(2024, 5, 10))];
        let merged = merge_usage(&existing, &[ProposedUsage::new("", 0, date(2024, 5, 12))]);
        assert_eq!(merged, existing);
    }

    #[test]
    fn test_result_is_newest_first() {
        let merged = merge_usage(
            &[UsageEntry::new("mat-a", 1, date(2024, 5, 1))],
            &[
                ProposedUsage::new("mat-b", 1, date(2024, 5, 20)),
                ProposedUsage::new("mat-c", 1, date(2024, 5, 10)),
            ],
        );
        let days: Vec<NaiveDate> = merged.iter().map(|e| e.date).collect();
        assert_eq!(days, vec![date(2024, 5, 20), date(2024, 5, 10), date(2024, 5, 1)]);
    }

    #[test]
    fn test_missing_fields_deserialize_as_incomplete_row() {
        let row: ProposedUsage = serde_json::from_str(r#"{"date":"2024-05-10"}"#).unwrap();
        assert!(row.material_id.is_blank());
        assert_eq!(row.quantity, 0);
        assert!(merge_usage(&[], &[row]).is_empty());
    }

    #[test]
    fn test_resolve_usage_uses_placeholder_for_unknown_material() {
        let materials = vec![material("mat-a", "Brake Pads", Ownership::Railway)];
        let lines = resolve_usage(
            &[
                UsageEntry::new("mat-a", 2, date(2024, 5, 10)),
                UsageEntry::new("mat-gone", 7, date(2024, 5, 9)),
            ],
            &materials,
        );
        assert_eq!(lines[0].material_name, "Brake Pads");
        assert_eq!(lines[0].ownership, Some(Ownership::Railway));
        assert_eq!(lines[1].material_name, UNKNOWN_MATERIAL);
        assert_eq!(lines[1].unit, "");
        assert_eq!(lines[1].ownership, None);
        assert_eq!(lines[1].quantity, 7);
    }

    #[test]
    fn test_totals_by_ownership() {
        let materials = vec![
            material("mat-r", "Welding Rod", Ownership::Railway),
            material("mat-s", "Seat Covers", Ownership::Sswpi),
        ];
        let entries = vec![
            UsageEntry::new("mat-r", 5, date(2024, 5, 1)),
            UsageEntry::new("mat-s", 40, date(2024, 5, 2)),
            UsageEntry::new("mat-r", 3, date(2024, 5, 3)),
            UsageEntry::new("mat-x", 1, date(2024, 5, 4)),
        ];
        assert_eq!(
            totals_by_ownership(&entries, &materials),
            OwnershipTotals {
                railway: 8,
                sswpi: 40,
                unattributed: 1,
            }
        );
    }

    #[test]
    fn test_totals_by_material_keeps_first_seen_order() {
        let entries = vec![
            UsageEntry::new("mat-b", 1, date(2024, 5, 3)),
            UsageEntry::new("mat-a", 2, date(2024, 5, 2)),
            UsageEntry::new("mat-b", 4, date(2024, 5, 1)),
        ];
        let totals = totals_by_material(&entries);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].material_id.as_str(), "mat-b");
        assert_eq!(totals[0].quantity, 5);
        assert_eq!(totals[1].quantity, 2);
    }

    #[test]
    fn test_totals_by_month() {
        let entries = vec![
            UsageEntry::new("mat-a", 1, date(2024, 6, 3)),
            UsageEntry::new("mat-a", 2, date(2024, 5, 30)),
            UsageEntry::new("mat-b", 3, date(2024, 5, 1)),
        ];
        let months = totals_by_month(&entries);
        assert_eq!(
            months,
            vec![
                MonthlyUsage { year: 2024, month: 5, quantity: 5 },
                MonthlyUsage { year: 2024, month: 6, quantity: 1 },
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_merge_preserves_total_quantity(quantities in proptest::collection::vec(1i64..50, 0..20)) {
            let day = date(2024, 5, 10);
            let batch: Vec<ProposedUsage> = quantities
                .iter()
                .enumerate()
                .map(|(i, q)| ProposedUsage::new(format!("mat-{}", i % 3), *q, day))
                .collect();
            let merged = merge_usage(&[], &batch);
            let expected: u64 = quantities.iter().map(|q| *q as u64).sum();
            prop_assert_eq!(merged.iter().map(|e| e.quantity).sum::<u64>(), expected);
            prop_assert!(merged.len() <= 3);
        }
    }
}
