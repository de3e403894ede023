//! Constants and fixed vocabularies for Electronic Journal processing
//!
//! The journal dialect is closed and versionless: the markers, tag shapes and
//! result codes below are fixed by the ATM software that writes the logs.

// =============================================================================
// Line Markers
// =============================================================================

/// Card insertion opens a customer transaction
pub const CARD_INSERTED: &str = "CARD INSERTED";

/// Card-less withdrawal selection opens a customer transaction
pub const CARD_LESS_SELECTED: &str = "CARD LESS SELECTED";

/// Supervisor safe-open marks the start of a maintenance session
pub const SUPERVISOR_SAFE_OPEN: &str = "SUPERVISOR SAFE OPEN";

/// Markers that open a new transaction segment
pub const TRANSACTION_START_MARKERS: &[&str] =
    &[CARD_INSERTED, SUPERVISOR_SAFE_OPEN, CARD_LESS_SELECTED];

/// Markers that name a transaction banner, in labeling priority
pub const TRANSACTION_LABEL_MARKERS: &[&str] = &[CARD_INSERTED, CARD_LESS_SELECTED];

/// Markers that end a supervisor session
pub const SUPERVISOR_EXIT_MARKERS: &[&str] = &[CARD_INSERTED, CARD_LESS_SELECTED];

/// Hardware self-test noise
pub const MOTORIZED_READER_NOISE: &str = "Motorized card reader detected";

/// Diagnostic tag whose lines are never reported
pub const DEBUG_20_TAG: &str = "[DEBUG:20]";

/// Status poll completions carry no dispense information
pub const GETINFO_COMPLETE: &str = "WFS_GETINFO_COMPLETE";

/// Lines dropped unconditionally before any routing
pub const NOISE_MARKERS: &[&str] = &[MOTORIZED_READER_NOISE, DEBUG_20_TAG, GETINFO_COMPLETE];

/// Informational journal tag
pub const INFO_10_TAG: &str = "[INFO:10]";

/// Receipt print journal tag
pub const PRINT_10_TAG: &str = "[PRINT:10]";

/// Telemetry tag carrying the cassette snapshot
pub const XML_15_TAG: &str = "[XML:15]";

/// Opening substring of the cassette container element
pub const CASH_UNITS_OPEN: &str = "<cunits";

// =============================================================================
// Cash Dispenser (CDM) Protocol
// =============================================================================

pub mod cdm {
    /// Dispense command name
    pub const CMD_DISPENSE: &str = "WFS_CMD_CDM_DISPENSE";

    /// Present command name
    pub const CMD_PRESENT: &str = "WFS_CMD_CDM_PRESENT";

    /// Asynchronous completion marker
    pub const EXECUTE_COMPLETE: &str = "WFS_EXECUTE_COMPLETE";

    /// Dispenser error marker
    pub const ERROR_MARKER: &str = "DSP--";

    /// Status code used when an error line carries no MStatus
    pub const DEFAULT_MSTATUS: &str = "0";

    /// Result name for a plain zero HRESULT
    pub const RESULT_SUCCESS: &str = "WFS_SUCCESS";

    /// Known negative HRESULT codes, checked in this order
    pub const RESULT_CODES: &[(&str, &str)] = &[
        ("-302", "WFS_ERR_CDM_CASHUNITERROR"),
        ("-306", "WFS_ERR_CDM_NOTDISPENSABLE"),
        ("-320", "WFS_ERR_CDM_PRERRORNOITEMS"),
        ("-322", "WFS_ERR_CDM_PRERRORUNKNOWN"),
        ("-14", "WFS_ERR_HARDWARE_ERROR"),
    ];
}

// =============================================================================
// Pattern Defaults
// =============================================================================

/// Built-in keyword allow-list (regex sources)
pub const DEFAULT_KEYWORD_PATTERNS: &[&str] = &[
    "CARD INSERTED",
    r"\[INFO:10\]",
    r"\[PRINT:10\]",
    r"\[XML:15\]",
    "WFS_CMD_CDM_DISPENSE",
    "WFS_CMD_CDM_PRESENT",
    "EventID: 302",
    "EventID: 303",
    "DSP--",
];

/// Built-in remove patterns (regex sources)
pub const DEFAULT_REMOVE_PATTERNS: &[&str] = &[
    r"\[TID:0x[A-Fa-f0-9]+\] \[INFO:\d+\]",
    r"\[TID:0x[A-Fa-f0-9]+\] \[PRINT:\d+\]",
    r"iforme:\d+\] Motorized card reader detected",
    "Motorized card reader detected",
    r"\[DEBUG:20\]",
    r"XFS WFSAsyncExecute.*CMD: 30[23].*ReqID",
    r"\(class\w+\.cpp:\d+\)",
];

// =============================================================================
// Cassette Reconciliation
// =============================================================================

/// Physical cash units reported by the dispenser
pub const MAX_CASSETTES: usize = 5;

/// Telemetry values are expressed in minor currency units
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Default currency symbol for amount lines
pub const DEFAULT_CURRENCY_SYMBOL: &str = "Rp";

/// Thousands separator used in amounts
pub const THOUSANDS_SEPARATOR: char = '.';

// =============================================================================
// Report Layout
// =============================================================================

/// Width of rule lines and banners
pub const RULE_WIDTH: usize = 80;

/// Separator between journal timestamp and content
pub const TIMESTAMP_GAP: &str = "    ";

/// Indent that centers the transaction banner title
pub const BANNER_INDENT: usize = 27;

/// Header row of the Standard table
pub const STANDARD_HEADER: &str = "TID|Trace Number|Participant ID|Transaction Time|Journal Time|text";

/// Field delimiter of the Standard table
pub const STANDARD_DELIMITER: char = '|';

/// Length of a journal timestamp truncated to seconds (`DD.MM.YYYY HH:MM:SS`)
pub const SECONDS_TIMESTAMP_LEN: usize = 19;

// =============================================================================
// Output and Configuration
// =============================================================================

/// Default directory for generated reports
pub const DEFAULT_OUTPUT_DIR: &str = "EJParse";

/// Date layout used on the command line and in report file names
pub const FILE_DATE_FORMAT: &str = "%d%m%Y";

/// Report file name prefix, followed by `<TID>_<DDMMYYYY>.txt`
pub const REPORT_FILE_PREFIX: &str = "EJ_";

/// Participant identifiers accepted for Standard rows
pub const PARTICIPANT_IDS: &[&str] = &["200", "008", "002", "009"];

/// Participant identifier used when none or an unknown one is given
pub const DEFAULT_PARTICIPANT_ID: &str = "200";

/// Configuration directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "ej-processor";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Configuration key for the keyword allow-list
pub const CONFIG_KEY_KEYWORDS: &str = "logKeywordPatterns";

/// Configuration key for the remove patterns
pub const CONFIG_KEY_REMOVE: &str = "logRemovePatterns";

/// Configuration key for the currency symbol
pub const CONFIG_KEY_CURRENCY: &str = "currencySymbol";

// =============================================================================
// Progress and Logging
// =============================================================================

/// Lines between progress bar refreshes
pub const PROGRESS_UPDATE_INTERVAL: usize = 1000;

/// Log levels
pub const LOG_LEVEL_ERROR: &str = "error";
pub const LOG_LEVEL_WARN: &str = "warn";
pub const LOG_LEVEL_INFO: &str = "info";
pub const LOG_LEVEL_DEBUG: &str = "debug";
pub const LOG_LEVEL_TRACE: &str = "trace";
