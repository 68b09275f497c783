//! Crop advisory reference table

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::models::{CropAdvisory, CropDataset, CropType, GrowthStage};
use crate::types::LocalizedName;

static CROP_DATASETS: OnceLock<BTreeMap<CropType, CropDataset>> = OnceLock::new();

/// The bundled crop datasets, keyed by crop type
pub fn crop_datasets() -> &'static BTreeMap<CropType, CropDataset> {
    CROP_DATASETS.get_or_init(|| {
        CropType::ALL
            .into_iter()
            .map(|c| (c, build_dataset(c)))
            .collect()
    })
}

pub fn crop_dataset(crop_type: CropType) -> Option<&'static CropDataset> {
    crop_datasets().get(&crop_type)
}

/// Stage guidance for a crop
pub fn advisory_for(crop_type: CropType, stage: GrowthStage) -> Option<&'static CropAdvisory> {
    crop_dataset(crop_type)?.advisory(stage)
}

/// Rows are (fertilizer, pest alert, irrigation, tips) in stage order
type StageRow = (&'static str, &'static str, &'static str, &'static [&'static str]);

fn build_dataset(crop_type: CropType) -> CropDataset {
    let (name, rows) = dataset_rows(crop_type);
    let advisories = GrowthStage::ALL
        .into_iter()
        .zip(rows)
        .map(|(stage, (fertilizer, pest_alert, irrigation, tips))| CropAdvisory {
            stage,
            fertilizer: fertilizer.to_string(),
            pest_alert: pest_alert.to_string(),
            irrigation: irrigation.to_string(),
            tips: tips.iter().map(|t| t.to_string()).collect(),
        })
        .collect();

    CropDataset {
        crop_type,
        name,
        advisories,
    }
}

fn dataset_rows(crop_type: CropType) -> (LocalizedName, [StageRow; 5]) {
    match crop_type {
        CropType::Rice => (
            LocalizedName::new("Rice", "धान", "भात"),
            [
                ("Basal DAP 50 kg/acre at transplanting", "Watch nursery for blast", "Keep 2-3 cm standing water", &["Transplant 21-25 day old seedlings"]),
                ("Top dress urea 25 kg/acre at tillering", "Stem borer: check for dead hearts", "Maintain 5 cm water", &["Weed before second top dressing"]),
                ("Potash 20 kg/acre at panicle initiation", "Brown planthopper at plant base", "Never let field dry at flowering", &["Avoid spraying during anthesis"]),
                ("No further fertilizer", "Gundhi bug on milky grains", "Drain field 10 days before harvest", &["Check grain moisture"]),
                ("Plan green manure for next season", "Store grain dry against weevils", "None", &["Harvest at 20-22% grain moisture", "Dry to 14% before storage"]),
            ],
        ),
        CropType::Wheat => (
            LocalizedName::new("Wheat", "गेहूं", "गहू"),
            [
                ("Full phosphorus and half nitrogen at sowing", "Termites in dry fields", "Pre-sowing irrigation", &["Seed rate 40 kg/acre"]),
                ("Remaining nitrogen at first irrigation", "Aphids on young leaves", "Crown root irrigation at 21 days", &["Remove Phalaris minor early"]),
                ("Foliar potassium nitrate if leaves yellow", "Yellow rust stripes", "Irrigate at heading", &["Avoid irrigation in strong wind"]),
                ("No further fertilizer", "Karnal bunt in humid weather", "Last irrigation at milk stage", &["Watch for lodging"]),
                ("Incorporate stubble, do not burn", "Store grain below 12% moisture", "None", &["Harvest when grains are hard"]),
            ],
        ),
        CropType::Maize => (
            LocalizedName::new("Maize", "मक्का", "मका"),
            [
                ("NPK 50:25:20 kg/acre basal", "Cutworms at seedling stage", "Light irrigation after sowing", &["Sow on ridges in heavy soil"]),
                ("Top dress nitrogen at knee height", "Fall armyworm in whorls", "Irrigate every 8-10 days", &["Earth up at 30 days"]),
                ("Zinc sulphate spray if striping appears", "Stem borer holes in stalks", "Critical: irrigate at tasseling and silking", &["Ensure good pollination"]),
                ("No further fertilizer", "Cob borer", "Reduce irrigation", &["Harvest when husks turn brown"]),
                ("Return stalks to soil", "Grain weevils in storage", "None", &["Dry cobs before shelling"]),
            ],
        ),
        CropType::Cotton => (
            LocalizedName::new("Cotton", "कपास", "कापूस"),
            [
                ("Basal NPK with FYM", "Sucking pests on cotyledons", "Light irrigation for germination", &["Gap fill within 10 days"]),
                ("Split nitrogen at square formation", "Whitefly and jassids under leaves", "Irrigate every 12-15 days", &["Install yellow sticky traps"]),
                ("Foliar 2% DAP at flowering", "Pink bollworm rosette flowers", "Avoid water stress at boll set", &["Use pheromone traps"]),
                ("Stop nitrogen", "Bollworm exit holes", "Stop irrigation when bolls open", &["Pick clean, dry cotton"]),
                ("Plan crop rotation", "Destroy stalks to break bollworm cycle", "None", &["Pick in the morning after dew dries"]),
            ],
        ),
        CropType::Sugarcane => (
            LocalizedName::new("Sugarcane", "गन्ना", "ऊस"),
            [
                ("Basal SSP and potash in furrows", "Termites in setts", "Irrigate immediately after planting", &["Treat setts before planting"]),
                ("Nitrogen in three splits", "Early shoot borer", "Irrigate every 7-10 days", &["Earth up at 90 days"]),
                ("Final nitrogen dose", "Top borer and woolly aphid", "Maintain regular irrigation", &["Tie canes against lodging"]),
                ("No further fertilizer", "Red rot in stalks", "Reduce irrigation to ripen cane", &["Check brix before harvest"]),
                ("Trash mulching for ratoon", "Remove diseased clumps", "None", &["Crush within 24 hours of cutting"]),
            ],
        ),
        CropType::Pulses => (
            LocalizedName::new("Pulses", "दालें", "कडधान्ये"),
            [
                ("Rhizobium seed treatment and DAP basal", "Seed rot in wet soil", "Sow in moist soil", &["Avoid waterlogged fields"]),
                ("No nitrogen needed once nodules form", "Aphids and thrips", "One irrigation at branching", &["Weed within 30 days"]),
                ("2% urea spray if flowers drop", "Pod borer larvae on flowers", "Light irrigation at flowering", &["Avoid excess water"]),
                ("No further fertilizer", "Pod fly", "Stop irrigation", &["Harvest when pods turn brown"]),
                ("Leave roots in soil for nitrogen", "Pulse beetle in storage", "None", &["Sun dry before storage"]),
            ],
        ),
        CropType::Vegetables => (
            LocalizedName::new("Vegetables", "सब्जियां", "भाजीपाला"),
            [
                ("Well rotted compost in beds", "Damping off in nursery", "Light frequent watering", &["Use raised beds"]),
                ("Nitrogen top dressing every 15 days", "Leaf miners and aphids", "Drip irrigation daily", &["Stake climbing crops"]),
                ("Boron and calcium sprays", "Fruit borer", "Steady moisture to avoid fruit crack", &["Hand pollinate if bees are scarce"]),
                ("Potash for fruit quality", "Fruit flies", "Reduce watering before picking", &["Pick regularly"]),
                ("Compost residues", "Remove infested fruit", "Irrigate after each picking", &["Grade produce before market"]),
            ],
        ),
    }
}
