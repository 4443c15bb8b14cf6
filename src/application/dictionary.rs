//! Bilingual commodity dictionary.
//!
//! Maps Marathi commodity labels from the APMC pages to English display
//! names and back. Lookups are exact, case-sensitive string matches. A
//! Marathi label missing from the table is sent to the remote translator
//! once, even when several callers miss on it at the same time; the answer
//! is remembered for the rest of the process lifetime.

use crate::domain::ports::diagnostics::{DiagnosticsSink, FallbackEvent, FallbackKind};
use crate::domain::ports::translator::Translator;
use crate::domain::values::language::{CommodityName, LanguageForm};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Curated `(marathi, english)` pairs. Where two Marathi spellings share an
/// English name, the first listed is the one English resolves back to.
const KNOWN_COMMODITIES: &[(&str, &str)] = &[
    ("कांदा", "Onion"),
    ("बटाटा", "Potato"),
    ("लसूण", "Garlic"),
    ("आले", "Ginger"),
    ("भेंडी", "Lady Finger"),
    ("गवार", "Cluster Beans"),
    ("टोमॅटो", "Tomato"),
    ("मटार", "Peas"),
    ("घेवडा", "Ridge Gourd"),
    ("दोडका", "Sponge Gourd"),
    ("हि.मिरची", "Green Chilli"),
    ("दुधीभोपळा", "Bottle Gourd"),
    ("काकडी", "Cucumber"),
    ("कारली", "Bitter Gourd"),
    ("डांगर", "Yam"),
    ("गाजर", "Carrot"),
    ("पापडी", "Papdi"),
    ("पडवळ", "Snake Gourd"),
    ("फूलकोबी", "Cauliflower"),
    ("फ्लॉवर", "Cauliflower"),
    ("कोबी", "Cabbage"),
    ("वांगे", "Brinjal"),
    ("वांगी", "Brinjal"),
    ("ढोबळी", "Dudhi"),
    ("सुरण", "Yam"),
    ("तोंडली", "Tondli"),
    ("बीट", "Beetroot"),
    ("कोहळा", "Pumpkin"),
    ("पावटा", "Pavta"),
    ("वालवर", "Valvar"),
    ("शेवगा", "Drumstick"),
    ("कैरी", "Raw Mango"),
    ("ढेमसा", "Dhemsa"),
    ("नवलकोल", "Navalkol"),
    ("चवळी", "Chawli"),
    ("रताळी", "Ratalee"),
    ("परवल", "Parwal"),
    ("घोसाळी", "Ghosali"),
    ("कडीपत्ता", "Curry Leaves"),
    ("आरवी", "Arvi"),
    ("लाल व पिवळी ढाेबळी", "Red and Yellow Dudhi"),
    ("बेझील", "Basil"),
    ("ब्रोकाेली", "Broccoli"),
    ("पाेकचाय", "Pokchoy"),
    ("चायना काेबी", "Chinese Cabbage"),
    ("लाल काेबी", "Red Cabbage"),
    ("बेबी काॅर्न", "Baby Corn"),
    ("झुकुणी", "Zucchini"),
    ("चेरी टॅामेटो", "Cherry Tomato"),
    ("सॅलड", "Salad"),
    ("सॅलरी", "Celery"),
    ("मशरुम", "Mushroom"),
    ("कमल काकडी", "Lotus Root"),
    ("राेमन", "Roman Lettuce"),
    ("लिफी", "Leek"),
    ("चायना लसुण", "Chinese Garlic"),
    ("कोथिंबीर", "Coriander"),
    ("मेथी", "Fenugreek"),
    ("शेपू", "Shepu"),
    ("कांदापात", "Spring Onion"),
    ("पालक", "Spinach"),
    ("मुळा", "Radish"),
    ("चवळी पाला", "Chawli Leaves"),
    ("करडई", "Karadai"),
    ("राजगिरा", "Rajgira"),
    ("पुदीना", "Mint"),
    ("अंबाडी", "Ambadhi"),
    ("चुका", "Chuka"),
    ("आईसबर्ग", "Iceberg Lettuce"),
    ("लिंबू", "Lemon"),
    ("पेरु", "Guava"),
    ("फणस", "Jackfruit"),
    ("पीअर", "Pear"),
    ("संञा", "Sapota"),
    ("अननस", "Pineapple"),
    ("अंजीर", "Fig"),
    ("स्ट्रॉबेरी", "Strawberry"),
    ("चिक्कू", "Chikoo"),
    ("डाळींब-नं.१", "Pomegranate-No.1"),
    ("सफरचंद-सिमला", "Apple-Simla"),
    ("कलिगङ", "Kalingad"),
    ("आवळा", "Amla"),
    ("केळी", "Banana"),
    ("मोसंबी", "Mosambi"),
    ("पपई", "Papaya"),
    ("द्राक्ष - तासगांव", "Grapes - Tasgaon"),
];

/// A translation shared by every caller that asked for the same label
/// while it was outstanding. `None` once settled means the call failed.
type InFlight = Arc<OnceCell<Option<String>>>;

#[derive(Default)]
struct Tables {
    to_primary: HashMap<String, String>,
    to_secondary: HashMap<String, String>,
    pending: HashMap<String, InFlight>,
}

impl Tables {
    fn insert(&mut self, secondary: &str, primary: &str) {
        self.to_primary
            .entry(secondary.to_string())
            .or_insert_with(|| primary.to_string());
        self.to_secondary
            .entry(primary.to_string())
            .or_insert_with(|| secondary.to_string());
    }

    fn find(&self, label: &str, form: LanguageForm) -> Option<CommodityName> {
        match form {
            LanguageForm::Secondary => self
                .to_primary
                .get(label)
                .map(|primary| CommodityName::new(primary.clone(), label)),
            LanguageForm::Primary => self
                .to_secondary
                .get(label)
                .map(|secondary| CommodityName::new(label, secondary.clone())),
        }
    }
}

/// Shared, growable commodity name mapping.
///
/// Cheap to share behind an `Arc`; the learned entries live as long as the
/// dictionary does and are never evicted. Concurrent misses on the same
/// label wait on a single translator call.
pub struct CommodityDictionary {
    tables: Mutex<Tables>,
    translator: Option<Arc<dyn Translator>>,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl CommodityDictionary {
    pub fn new(
        translator: Option<Arc<dyn Translator>>,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        let mut tables = Tables::default();
        for (secondary, primary) in KNOWN_COMMODITIES {
            tables.insert(secondary, primary);
        }
        Self {
            tables: Mutex::new(tables),
            translator,
            diagnostics,
        }
    }

    /// Number of distinct secondary labels currently known, learned ones included.
    pub fn len(&self) -> usize {
        self.tables
            .lock()
            .map(|t| t.to_primary.len())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Table-only lookup; never calls the translator.
    pub fn lookup(&self, label: &str, form: LanguageForm) -> Option<CommodityName> {
        self.tables.lock().ok()?.find(label, form)
    }

    /// Resolve `label`, written in `form`, into both renderings.
    ///
    /// Misses on secondary labels go to the remote translator when one is
    /// configured. All other misses, and failed translations, echo the label
    /// into both forms.
    pub async fn resolve(&self, label: &str, form: LanguageForm) -> CommodityName {
        let translator = match (form, &self.translator) {
            (LanguageForm::Secondary, Some(t)) => t,
            _ => {
                return self.lookup(label, form).unwrap_or_else(|| {
                    debug!(label, %form, "commodity not in dictionary, passing through");
                    CommodityName::passthrough(label)
                });
            }
        };

        let cell = {
            let Ok(mut tables) = self.tables.lock() else {
                return CommodityName::passthrough(label);
            };
            if let Some(name) = tables.find(label, form) {
                return name;
            }
            tables.pending.entry(label.to_string()).or_default().clone()
        };

        let translated = cell
            .get_or_init(|| self.translate(translator.as_ref(), label))
            .await
            .clone();
        self.settle(label, &cell, translated.as_deref());

        match translated {
            Some(primary) => CommodityName::new(primary, label),
            None => CommodityName::passthrough(label),
        }
    }

    async fn translate(&self, translator: &dyn Translator, label: &str) -> Option<String> {
        match translator.translate(label).await {
            Ok(primary) => {
                info!(label, %primary, translator = translator.name(), "learned commodity name");
                Some(primary)
            }
            Err(e) => {
                warn!(label, error = %e, "translation failed, passing label through");
                self.diagnostics.record(FallbackEvent::new(
                    FallbackKind::Translation,
                    format!("{label}: {e}"),
                ));
                None
            }
        }
    }

    /// Record a finished translation and retire its in-flight slot, so a
    /// failed label is retried by the next caller.
    fn settle(&self, label: &str, cell: &InFlight, primary: Option<&str>) {
        let Ok(mut tables) = self.tables.lock() else {
            return;
        };
        if let Some(primary) = primary {
            tables.insert(label, primary);
        }
        if tables
            .pending
            .get(label)
            .is_some_and(|current| Arc::ptr_eq(current, cell))
        {
            tables.pending.remove(label);
        }
    }
}
