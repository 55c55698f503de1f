//! Column vocabulary of the screening data sheet.
//!
//! Names match the exported data sheet verbatim, including its spelling.

// Identifiers
pub const DISTRICT: &str = "DISTRICT";
pub const LOCATION: &str = "LOCATION OF SCREENING";
pub const DATESCREEN: &str = "DATESCREEN";
pub const ICNUMBER: &str = "ICNUMBER";

/// Composite natural key of a screening record.
pub const ID_COLUMNS: [&str; 4] = [DISTRICT, LOCATION, DATESCREEN, ICNUMBER];

// Demographics
pub const DATEBIRTH: &str = "DATEBIRTH";
pub const GENDER_CODE: &str = "GENDER CODE";
pub const TELEPHONE: &str = "TELEPHONE NO";
pub const EDUCATION: &str = "EDUCATION";
pub const OCCUPATION: &str = "OCCUPATION";

// Indicators
pub const LESION: &str = "LESION";
pub const HABITS: &str = "HABITS";
pub const REFER_SPECIALIST: &str = "REFERAL TO SPECIALIST";

// Specialist referral
pub const DATE_REFERRED: &str = "DATE REFERRED";
pub const SPECIALIST_APPT_DATE: &str = "SPECIALIST APPT DATE";
pub const DATE_SEEN_SPECIALIST: &str = "DATE SEEN BY SPECIALIST";

// Habit details
pub const TOBACCO: &str = "TOBACCO";
pub const TOBACCO_ADVISED: &str = "TOBACCO ADVISED";
pub const TOBACCO_QUIT: &str = "TOBACCO QUIT";
pub const BETEL: &str = "BETEL QUID";
pub const BETEL_ADVISED: &str = "BETEL QUID ADVISED";
pub const BETEL_QUIT: &str = "BETEL QUID QUIT";
pub const ALCOHOL: &str = "ALCOHOL";
pub const ALCOHOL_ADVISED: &str = "ALCOHOL ADVISED";
pub const ALCOHOL_QUIT: &str = "ALCOHOL QUIT";

/// Habit status columns, one per substance.
pub const HABIT_STATUS_COLUMNS: [&str; 3] = [TOBACCO, BETEL, ALCOHOL];

// Quit services
pub const REFERRAL_QUIT: &str = "REFERRAL QUIT SERVICES";
pub const READY_QUIT_TOBACCO: &str = "READY TO QUIT TOBACCO";
pub const DATE_REFERRED_QUIT: &str = "DATE REFERRED QUIT SER";
pub const QUIT_APPT_DATE: &str = "TARIKH TEMUJANJI QUIT SERVICE";
pub const ATTEND_FIRST_APPT: &str = "ATTEND FIRST APPT";
pub const INTERVENTION_STATUS: &str = "INTERVENTION STATUS";

// History
pub const MEDICAL_HISTORY: &str = "MEDICAL HISTORY";
pub const MEDICAL_HISTORY_SPECIFY: &str = "MEDICAL HISTORY SPECIFY";
pub const FAMILY_HISTORY: &str = "FAMILY HISTORY CANCER";
pub const FAMILY_HISTORY_SPECIFY: &str = "FAMILY HISTORY CANCER SPECIFY";
pub const FAMILY_HISTORY_RELATION: &str = "FAMILY HISTORY CANCER RELATION";

/// Columns holding calendar dates.
pub const DATE_COLUMNS: [&str; 7] = [
    DATESCREEN,
    DATEBIRTH,
    DATE_REFERRED,
    SPECIALIST_APPT_DATE,
    DATE_SEEN_SPECIALIST,
    DATE_REFERRED_QUIT,
    QUIT_APPT_DATE,
];

/// Columns holding yes/no indicators.
pub const BOOLEAN_COLUMNS: [&str; 6] = [
    LESION,
    HABITS,
    REFER_SPECIALIST,
    REFERRAL_QUIT,
    MEDICAL_HISTORY,
    FAMILY_HISTORY,
];

// Columns derived by the general view.
pub const IC_BIRTH_DATE: &str = "ic_birth_date";
pub const VALID_IC_DIGITS: &str = "valid_ic_digits";
pub const VALID_IC_DATE: &str = "valid_ic_date";
pub const VALID_IC: &str = "valid_ic";

// Columns of the lesion view.
pub const LESION_ID: &str = "lesion_id";
pub const LESION_TYPE: &str = "type";
pub const LESION_SIZE: &str = "size";
pub const LESION_SITES: [&str; 4] = ["site_A", "site_B", "site_C", "site_D"];
pub const LESION_FILLED: &str = "lesion_filled";

/// Store column tagging each failure row with its source file.
pub const FILE: &str = "file";
/// Store column holding the failure descriptor.
pub const FAIL: &str = "fail";
