//! Fixed reference lists the synthetic dataset is drawn from.

/// A hospital with its fixed map position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HospitalSite {
    pub name: &'static str,
    pub city: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// A tracked supply type with its per-hospital minimum stock level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplyItem {
    pub name: &'static str,
    pub category: &'static str,
    pub minimum_required: u32,
}

pub const HOSPITALS: [HospitalSite; 8] = [
    HospitalSite {
        name: "Govt Hospital Srivilliputhur",
        city: "Srivilliputhur",
        latitude: 9.5105,
        longitude: 77.6330,
    },
    HospitalSite {
        name: "Madurai Medical College",
        city: "Madurai",
        latitude: 9.9252,
        longitude: 78.1198,
    },
    HospitalSite {
        name: "Rajiv Gandhi Govt General Hospital",
        city: "Chennai",
        latitude: 13.0827,
        longitude: 80.2707,
    },
    HospitalSite {
        name: "Coimbatore Medical College",
        city: "Coimbatore",
        latitude: 11.0168,
        longitude: 76.9558,
    },
    HospitalSite {
        name: "Tirunelveli Medical College",
        city: "Tirunelveli",
        latitude: 8.7139,
        longitude: 77.7567,
    },
    HospitalSite {
        name: "Apollo Speciality Hospitals",
        city: "Trichy",
        latitude: 10.7905,
        longitude: 78.7047,
    },
    HospitalSite {
        name: "Salem Govt Hospital",
        city: "Salem",
        latitude: 11.6643,
        longitude: 78.1460,
    },
    HospitalSite {
        name: "Thanjavur Medical College",
        city: "Thanjavur",
        latitude: 10.7870,
        longitude: 79.1378,
    },
];

pub const SUPPLIES: [SupplyItem; 8] = [
    SupplyItem {
        name: "Oxygen Cylinder (B-Type)",
        category: "Respiratory",
        minimum_required: 50,
    },
    SupplyItem {
        name: "Remdesivir Injection",
        category: "Medicine",
        minimum_required: 100,
    },
    SupplyItem {
        name: "Blood Bag (O+ Positive)",
        category: "Blood Bank",
        minimum_required: 20,
    },
    SupplyItem {
        name: "Surgical Gloves (Sterile)",
        category: "Consumables",
        minimum_required: 500,
    },
    SupplyItem {
        name: "Ventilator Circuit",
        category: "Equipment",
        minimum_required: 15,
    },
    SupplyItem {
        name: "N95 Masks",
        category: "PPE",
        minimum_required: 300,
    },
    SupplyItem {
        name: "Paracetamol IV",
        category: "Medicine",
        minimum_required: 200,
    },
    SupplyItem {
        name: "Insulin Vials",
        category: "Medicine",
        minimum_required: 150,
    },
];

/// Suppliers the synthetic profile assigns to rows
pub const SUPPLIERS: [&str; 3] = ["MedSupply Co", "LifeLine Pharma", "HealthCorp"];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_names_are_unique() {
        let hospitals: HashSet<_> = HOSPITALS.iter().map(|h| h.name).collect();
        let supplies: HashSet<_> = SUPPLIES.iter().map(|s| s.name).collect();
        assert_eq!(hospitals.len(), HOSPITALS.len());
        assert_eq!(supplies.len(), SUPPLIES.len());
    }

    #[test]
    fn every_supply_has_a_positive_minimum() {
        assert!(SUPPLIES.iter().all(|s| s.minimum_required > 0));
    }
}
