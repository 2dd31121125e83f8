//! Low/medium/high price-tier selection over a sorted candidate list.

use serde::{Deserialize, Serialize};

use super::observation::HotelPayload;

/// Preference constraints applied before tier selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StayPreferences {
    /// Exact refundability match when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refundable: Option<bool>,
    /// Inclusive ceiling on the lead price amount when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

impl StayPreferences {
    /// Whether a hotel passes the preference filter.
    pub fn accepts(&self, hotel: &HotelPayload) -> bool {
        if let Some(refundable) = self.refundable {
            if hotel.refundable != Some(refundable) {
                return false;
            }
        }
        if let Some(max_price) = self.max_price {
            if hotel.lead_price_amount() > max_price {
                return false;
            }
        }
        true
    }
}

/// L/M/H price-tier picks. Tiers appear only once enough candidates exist:
/// a single candidate must not be misrepresented as three distinct price
/// points, so `medium` needs two candidates and `high` needs three.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recommendations {
    pub low: Option<HotelPayload>,
    pub medium: Option<HotelPayload>,
    pub high: Option<HotelPayload>,
    /// Number of candidates that survived the preference filter.
    pub total_options: usize,
}

impl Recommendations {
    /// Select tiers from a list already sorted ascending by lead price.
    ///
    /// For n candidates: low = first (n >= 1), medium = index floor(n/2)
    /// (n >= 2), high = last (n >= 3). An empty list yields an explicitly
    /// empty result, not an error.
    pub fn from_sorted(hotels: Vec<HotelPayload>) -> Self {
        let n = hotels.len();
        Self {
            low: (n >= 1).then(|| hotels[0].clone()),
            medium: (n >= 2).then(|| hotels[n / 2].clone()),
            high: (n >= 3).then(|| hotels[n - 1].clone()),
            total_options: n,
        }
    }

    /// Whether no candidates survived filtering.
    pub fn is_empty(&self) -> bool {
        self.total_options == 0
    }
}
