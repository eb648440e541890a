//! Content shown for each severity band.
//!
//! A static lookup: the scorer decides the band, this table decides what the
//! results page offers for it.

use std::fmt;

use klara_core::models::assessment::RiskFactors;
use klara_core::models::severity::Severity;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    ArtificialTears,
    WarmCompresses,
    LidCare,
    Supplements,
}

/// How many products to recommend from one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quota {
    Up(usize),
    All,
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProductCategory::ArtificialTears => "Artificial tears",
            ProductCategory::WarmCompresses => "Warm compresses",
            ProductCategory::LidCare => "Lid care",
            ProductCategory::Supplements => "Supplements",
        })
    }
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quota::Up(1) => f.write_str("1 product"),
            Quota::Up(n) => write!(f, "up to {n} products"),
            Quota::All => f.write_str("all products"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CarePlan {
    pub severity: Severity,
    pub summary: &'static str,
    pub products: &'static [(ProductCategory, Quota)],
    pub prescription: bool,
    pub procedures: bool,
    /// Prompt shown next to the booking button; `None` hides booking.
    pub booking: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Treatment {
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
}

pub fn care_plan(severity: Severity) -> &'static CarePlan {
    match severity {
        Severity::Mild => &MILD,
        Severity::Moderate => &MODERATE,
        Severity::Severe => &SEVERE,
    }
}

/// MGD guidance is shown whenever the MGD indicator was raised.
pub fn shows_mgd_guidance(risk_factors: &RiskFactors) -> bool {
    risk_factors.mgd
}

pub const MGD_SYMPTOMS: [&str; 4] = [
    "Morning crusting or sticky eyelids",
    "Film over vision that clears with blinking",
    "Symptoms worse in dry or windy conditions",
    "Eyelid redness or inflammation",
];

static MILD: CarePlan = CarePlan {
    severity: Severity::Mild,
    summary: "Your symptoms suggest mild dry eye. Simple lifestyle changes and over-the-counter treatments can provide significant relief.",
    products: &[
        (ProductCategory::ArtificialTears, Quota::Up(2)),
        (ProductCategory::WarmCompresses, Quota::Up(1)),
    ],
    prescription: false,
    procedures: false,
    booking: None,
};

static MODERATE: CarePlan = CarePlan {
    severity: Severity::Moderate,
    summary: "Your symptoms suggest moderate dry eye. A combination of OTC products, lid care, and potentially prescription treatments may be beneficial.",
    products: &[
        (ProductCategory::ArtificialTears, Quota::Up(2)),
        (ProductCategory::WarmCompresses, Quota::Up(1)),
        (ProductCategory::LidCare, Quota::Up(2)),
        (ProductCategory::Supplements, Quota::Up(1)),
    ],
    prescription: true,
    procedures: false,
    booking: Some("We're here when you're ready"),
};

static SEVERE: CarePlan = CarePlan {
    severity: Severity::Severe,
    summary: "Your symptoms suggest severe dry eye requiring comprehensive treatment. We strongly recommend a specialist consultation alongside these recommendations.",
    products: &[
        (ProductCategory::ArtificialTears, Quota::Up(3)),
        (ProductCategory::WarmCompresses, Quota::All),
        (ProductCategory::LidCare, Quota::Up(2)),
        (ProductCategory::Supplements, Quota::Up(2)),
    ],
    prescription: true,
    procedures: true,
    booking: Some("Let's get you help"),
};

pub static PRESCRIPTION_TREATMENTS: [Treatment; 3] = [
    Treatment {
        name: "Cyclosporine (Restasis)",
        category: "Anti-inflammatory",
        description: "Prescription anti-inflammatory drops that help your eyes produce more natural tears.",
    },
    Treatment {
        name: "Lifitegrast (Xiidra)",
        category: "Anti-inflammatory",
        description: "Blocks inflammation that contributes to dry eye.",
    },
    Treatment {
        name: "Short-term Corticosteroid Drops",
        category: "Corticosteroid",
        description: "Prescribed for a limited time to reduce inflammation during flare-ups.",
    },
];

pub static PROCEDURAL_TREATMENTS: [Treatment; 4] = [
    Treatment {
        name: "Punctal Plugs",
        category: "In-office procedure",
        description: "Tiny silicone plugs that help tears stay on the eye surface longer.",
    },
    Treatment {
        name: "LipiFlow Thermal Pulsation",
        category: "In-office procedure",
        description: "Controlled heat and pressure to unblock meibomian glands.",
    },
    Treatment {
        name: "Intense Pulsed Light (IPL) Therapy",
        category: "In-office procedure",
        description: "Light-based treatment that reduces inflammation and improves gland function.",
    },
    Treatment {
        name: "Meibomian Gland Expression",
        category: "In-office procedure",
        description: "Manual expression of blocked glands to restore healthy oil flow.",
    },
];

impl CarePlan {
    /// Treatments to discuss with the ophthalmologist for this band.
    pub fn treatments(&self) -> Vec<&'static Treatment> {
        let mut out = Vec::new();
        if self.prescription {
            out.extend(PRESCRIPTION_TREATMENTS.iter());
        }
        if self.procedures {
            out.extend(PROCEDURAL_TREATMENTS.iter());
        }
        out
    }
}
