//! Static lookup tables for AFP structured fields, presentation-text
//! function codes and the device color table.
//!
//! These tables are fixed data from the MO:DCA and PTOCA architecture
//! references. The decode pipeline consumes them read-only.

/// Structured-field type codes.
///
/// The three-byte identifier of each known structured field, as a `u32`
/// holding the big-endian code in its low 24 bits.
pub mod sf {
    pub const NOP: u32 = 0xd3eeee;
    pub const BRG: u32 = 0xd3a8c6;
    pub const ERG: u32 = 0xd3a9c6;
    pub const BRS: u32 = 0xd3a8ce;
    pub const ERS: u32 = 0xd3a9ce;
    pub const BCP: u32 = 0xd3a887;
    pub const ECP: u32 = 0xd3a987;
    pub const CPD: u32 = 0xd3a687;
    pub const CPC: u32 = 0xd3a787;
    pub const CPI: u32 = 0xd38c87;
    pub const BFN: u32 = 0xd3a889;
    pub const EFN: u32 = 0xd3a989;
    pub const FND: u32 = 0xd3a689;
    pub const FNC: u32 = 0xd3a789;
    pub const FNM: u32 = 0xd3a289;
    pub const FNN: u32 = 0xd3ab89;
    pub const FNO: u32 = 0xd3ae89;
    pub const FNP: u32 = 0xd3ac89;
    pub const FNI: u32 = 0xd38c89;
    pub const FNG: u32 = 0xd3ee89;
    pub const BFM: u32 = 0xd3a8cd;
    pub const EFM: u32 = 0xd3a9cd;
    pub const BMM: u32 = 0xd3a8cc;
    pub const EMM: u32 = 0xd3a9cc;
    pub const PGP: u32 = 0xd3b1af;
    pub const MDD: u32 = 0xd3a688;
    pub const MCC: u32 = 0xd3a288;
    pub const MMC: u32 = 0xd3a788;
    pub const BPS: u32 = 0xd3a85f;
    pub const EPS: u32 = 0xd3a95f;
    pub const BIM: u32 = 0xd3a8fb;
    pub const EIM: u32 = 0xd3a9fb;
    pub const BOG: u32 = 0xd3a8c7;
    pub const EOG: u32 = 0xd3a9c7;
    pub const OBD: u32 = 0xd3a66b;
    pub const OBP: u32 = 0xd3ac6b;
    pub const MIO: u32 = 0xd3abfb;
    pub const IDD: u32 = 0xd3a6fb;
    pub const IPD: u32 = 0xd3eefb;
    pub const BDT: u32 = 0xd3a8a8;
    pub const EDT: u32 = 0xd3a9a8;
    pub const BNG: u32 = 0xd3a8ad;
    pub const ENG: u32 = 0xd3a9ad;
    pub const TLE: u32 = 0xd3a090;
    pub const IMM: u32 = 0xd3abcc;
    pub const BPG: u32 = 0xd3a8af;
    pub const EPG: u32 = 0xd3a9af;
    pub const BAG: u32 = 0xd3a8c9;
    pub const EAG: u32 = 0xd3a9c9;
    pub const MCF1: u32 = 0xd3b18a;
    pub const MCF: u32 = 0xd3ab8a;
    pub const MPS: u32 = 0xd3b15f;
    pub const PGD: u32 = 0xd3a6af;
    pub const PTD: u32 = 0xd3b19b;
    pub const BPT: u32 = 0xd3a89b;
    pub const EPT: u32 = 0xd3a99b;
    pub const PTX: u32 = 0xd3ee9b;
    pub const IPS: u32 = 0xd3af5f;
    pub const BGO: u32 = 0xd3a8bb;
    pub const EGR: u32 = 0xd3a9bb;
    pub const MGO: u32 = 0xd3abbb;
    pub const GDD: u32 = 0xd3a6bb;
    pub const GAD: u32 = 0xd3eebb;
    pub const BOC: u32 = 0xd3a892;
    pub const EOC: u32 = 0xd3a992;
    pub const CDD: u32 = 0xd3a692;
    pub const OCD: u32 = 0xd3ee92;
    pub const BMO: u32 = 0xd3a8df;
    pub const EMO: u32 = 0xd3a9df;
    pub const MDR: u32 = 0xd3abc3;
    pub const IOB: u32 = 0xd3afc3;
    pub const BSG: u32 = 0xd3a8d9;
    pub const ESG: u32 = 0xd3a9d9;
    pub const MPO: u32 = 0xd3abd8;
    pub const IPO: u32 = 0xd3afd8;
    pub const BCF: u32 = 0xd3a88a;
    pub const ECF: u32 = 0xd3a98a;
    pub const CFC: u32 = 0xd3a78a;
    pub const CFI: u32 = 0xd38c8a;
    pub const BII: u32 = 0xd3a87b;
    pub const EII: u32 = 0xd3a97b;
    pub const IOC: u32 = 0xd3a77b;
    pub const IID: u32 = 0xd3a67b;
    pub const IRD: u32 = 0xd3ee7b;
    pub const ICP: u32 = 0xd3ac7b;
    pub const CTC: u32 = 0xd3a79b;
    pub const PTD1: u32 = 0xd3a69b;
}

/// Look up the descriptive name of a structured-field type code.
///
/// Returns `None` for codes outside the known-field table.
pub fn field_name(id: u32) -> Option<&'static str> {
    use sf::*;
    let name = match id {
        BAG => "Begin Active Environment Group",
        BCF => "Begin Coded Font",
        BCP => "Begin Code Page",
        BDT => "Begin Document",
        BFM => "Begin Form Map",
        BFN => "Begin Font",
        BGO => "Begin Graphics Object",
        BII => "Begin IM Image Object",
        BIM => "Begin Image Object",
        BMM => "Begin Medium Map",
        BMO => "Begin Overlay",
        BNG => "Begin Named Page Group",
        BOC => "Begin Object Container",
        BOG => "Begin Object Environment Group",
        BPG => "Begin Page",
        BPS => "Begin Page Segment",
        BPT => "Begin Presentation Text Object",
        BRG => "Begin Resource Group",
        BRS => "Begin Resource",
        CDD => "Container Data Description",
        CFC => "Coded Font Control",
        CFI => "Coded Font Index",
        CPC => "Code Page Control",
        CPD => "Code Page Description",
        CPI => "Code Page Index",
        EAG => "End Active Environment Group",
        ECF => "End Coded Font",
        ECP => "End Code Page",
        EDT => "End Document",
        EFM => "End Form Map",
        EFN => "End Font",
        EGR => "End Graphics Object",
        EII => "End IM Image Object",
        EIM => "End Image Object",
        EMM => "End Medium Map",
        EMO => "End Overlay",
        ENG => "End Named Page Group",
        EOC => "End Object Container",
        EOG => "End Object Environment Group",
        EPG => "End Page",
        EPS => "End Page Segment",
        EPT => "End Presentation Text Object",
        ERG => "End Resource Group",
        ERS => "End Resource",
        FNC => "Font Control",
        FND => "Font Description",
        FNG => "Font Patterns",
        FNI => "Font Index",
        FNM => "Font Patterns Map",
        FNN => "Font Name Map",
        FNO => "Font Orientation",
        FNP => "Font Position",
        GAD => "Graphics Data",
        GDD => "Graphics Data Descriptor",
        ICP => "IM Image Cell Position",
        IDD => "Image Data Descriptor",
        IID => "IM Image Input Description",
        IMM => "Invoke Medium Map",
        IOC => "IM Image Output Control",
        IPD => "Image Picture Data",
        IPS => "Include Page Segment",
        IRD => "IM Image Raster Data",
        MCC => "Medium Copy Count",
        MCF1 => "Map Coded Font - Format 1",
        MCF => "Map Coded Font - Format 2",
        MDD => "Medium Description",
        MGO => "Map Graphics Object",
        MIO => "Map Image Object",
        MMC => "Medium Modification Control",
        MPS => "Map Page Segment",
        NOP => "NOP",
        OBD => "Object Area Descriptor",
        OBP => "Object Area Position",
        OCD => "Object Container Data",
        PGD => "Page Descriptor",
        PGP => "Page Position",
        PTD => "Presentation Text Data Descriptor - Format 2",
        PTD1 => "Presentation Text Data Description",
        PTX => "Presentation Text Data",
        TLE => "Tag Logical Element",
        MDR => "Map Data Resource",
        IOB => "Include Object",
        BSG => "Begin Resource Environment Group",
        ESG => "End Resource Environment Group",
        MPO => "Map Page Overlay",
        IPO => "Include Page Overlay",
        CTC => "Composed Text Control",
        _ => return None,
    };
    Some(name)
}

/// Whether a structured-field type code is in the known-field table.
pub fn is_known_field(id: u32) -> bool {
    field_name(id).is_some()
}

/// Escape sequence introducing each unchained presentation-text function.
pub const PTOCA_ESCAPE: u16 = 0x2bd3;

/// Presentation-text function codes, unchained form.
///
/// The chained form of each function is the unchained code plus one; the
/// low bit of a code on the wire therefore signals chaining.
pub mod ptoca {
    /// Absolute Move Baseline
    pub const AMB: u8 = 0xd2;
    /// Absolute Move Inline
    pub const AMI: u8 = 0xc6;
    /// Begin Suppression
    pub const BSU: u8 = 0xf2;
    /// Draw B-Axis Rule
    pub const DBR: u8 = 0xe6;
    /// Draw I-Axis Rule
    pub const DIR: u8 = 0xe4;
    /// End Suppression
    pub const ESU: u8 = 0xf4;
    /// Relative Move Baseline
    pub const RMB: u8 = 0xd4;
    /// Relative Move Inline
    pub const RMI: u8 = 0xc8;
    /// Repeat String
    pub const RPS: u8 = 0xee;
    /// Set Coded Font Local
    pub const SCFL: u8 = 0xf0;
    /// Set Extended Text Color
    pub const SEC: u8 = 0x80;
    /// Set Intercharacter Adjustment
    pub const SIA: u8 = 0xc2;
    /// Set Text Color
    pub const STC: u8 = 0x74;
    /// Set Text Orientation
    pub const STO: u8 = 0xf6;
    /// Set Variable Space Character Increment
    pub const SVI: u8 = 0xc4;
    /// Transparent Data
    pub const TRN: u8 = 0xda;
    /// No Operation
    pub const NOP: u8 = 0xf8;
}

/// Look up the name of a presentation-text function code (either form).
pub fn function_name(code: u8) -> Option<&'static str> {
    use ptoca::*;
    let name = match code & !1 {
        AMB => "Absolute Move Baseline",
        AMI => "Absolute Move Inline",
        BSU => "Begin Suppression",
        DBR => "Draw B-Axis Rule",
        DIR => "Draw I-Axis Rule",
        ESU => "End Suppression",
        RMB => "Relative Move Baseline",
        RMI => "Relative Move Inline",
        RPS => "Repeat String",
        SCFL => "Set Coded Font Local",
        SEC => "Set Extended Text Color",
        SIA => "Set Intercharacter Adjustment",
        STC => "Set Text Color",
        STO => "Set Text Orientation",
        SVI => "Set Variable Space Character Increment",
        TRN => "Transparent Data",
        NOP => "No Operation",
        _ => return None,
    };
    Some(name)
}

/// Sub-segment header tag inside Image Picture Data fields.
pub const IMAGE_DATA_TAG: u16 = 0xfe92;

/// Look up a Set Text Color device code in the color table.
///
/// Returns the 24-bit RGB value, or `None` for codes outside the table.
pub fn clut_lookup(code: u16) -> Option<u32> {
    let rgb = match code {
        0x0000 => 0x000000, // Device default
        0x0001 => 0x0000ff, // Blue
        0x0002 => 0xff0000, // Red
        0x0003 => 0xff00ff, // Pink/magenta
        0x0004 => 0x00ff00, // Green
        0x0005 => 0x00ffff, // Turquoise/cyan
        0x0006 => 0xffff00, // Yellow

        0xff00 => 0x000000, // Device default
        0xff01 => 0x0000ff, // Blue
        0xff02 => 0xff0000, // Red
        0xff03 => 0xff00ff, // Pink/magenta
        0xff04 => 0x00ff00, // Green
        0xff05 => 0x00ffff, // Turquoise/cyan
        0xff06 => 0xffff00, // Yellow

        0x0008 => 0x000000, // Black
        0x0010 => 0xa52a2a, // Brown
        0xff07 => 0x000000, // Device default
        0xff08 => 0x000000, // Reset color
        0xffff => 0x000000, // Default indicator
        _ => return None,
    };
    Some(rgb)
}
