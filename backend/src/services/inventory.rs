//! Material inventory views.

use crate::models::{Material, Ownership};

/// Materials whose known stock sits below their minimum level, in catalogue order.
pub fn low_stock(materials: &[Material]) -> Vec<Material> {
    materials
        .iter()
        .filter(|m| m.is_below_minimum())
        .cloned()
        .collect()
}

/// Materials owned by `ownership`, in catalogue order.
pub fn owned_by(materials: &[Material], ownership: Ownership) -> Vec<Material> {
    materials
        .iter()
        .filter(|m| m.ownership == ownership)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MaterialId;

    fn material(id: &str, stock: Option<u32>, min: Option<u32>, ownership: Ownership) -> Material {
        Material {
            id: MaterialId::new(id),
            name: format!("Material {}", id),
            material_code: id.to_uppercase(),
            unit: "piece".to_string(),
            stock_quantity: stock,
            min_stock_level: min,
            description: None,
            ownership,
        }
    }

    #[test]
    fn test_low_stock() {
        let materials = vec![
            material("a", Some(100), Some(20), Ownership::Railway),
            material("b", Some(3), Some(10), Ownership::Sswpi),
            material("c", None, Some(10), Ownership::Railway),
            material("d", Some(10), Some(10), Ownership::Railway),
        ];
        let low = low_stock(&materials);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].id.as_str(), "b");
    }

    #[test]
    fn test_owned_by() {
        let materials = vec![
            material("a", None, None, Ownership::Railway),
            material("b", None, None, Ownership::Sswpi),
        ];
        let railway = owned_by(&materials, Ownership::Railway);
        assert_eq!(railway.len(), 1);
        assert_eq!(railway[0].id.as_str(), "a");
    }
}
