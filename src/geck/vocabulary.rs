//! GECK vocabulary groups
//!
//! Each group becomes one highlighting rule. The token lists below are a
//! representative subset of the GECK wiki's function categories.

use crate::geck::flags::FeatureFlag;

/// Script keywords
#[rustfmt::skip]
pub const KEYWORDS: &[&str] = &[
    "scn", "ScriptName", "Begin", "End",
    "if", "elseif", "else", "endif",
    "set", "to", "let", "eval", "return",
    "short", "int", "long", "float", "ref", "reference",
    "array_var", "string_var",
    "while", "loop", "foreach", "continue", "break",
];

/// Block types (matched without regard to case)
#[rustfmt::skip]
pub const BLOCKTYPES: &[&str] = &[
    "GameMode", "MenuMode",
    "OnActivate", "OnActorEquip", "OnActorUnequip", "OnAdd",
    "OnClose", "OnCombatEnd", "OnDeath", "OnDestructionStageChange",
    "OnDrop", "OnEquip", "OnFire", "OnGrab", "OnHit", "OnHitWith",
    "OnLoad", "OnMagicEffectHit", "OnMurder", "OnOpen",
    "OnPackageChange", "OnPackageDone", "OnPackageEnd", "OnPackageStart",
    "OnRelease", "OnReset", "OnSell", "OnStartCombat",
    "OnTrigger", "OnTriggerEnter", "OnTriggerLeave", "OnUnequip",
    "SayToDone", "ScriptEffectStart", "ScriptEffectUpdate", "ScriptEffectFinish",
];

/// Functions available in the base GECK
#[rustfmt::skip]
pub const BASE_FUNCTIONS: &[&str] = &[
    "Activate", "AddItem", "AddScriptPackage", "AddSpell", "AddTopic",
    "Cast", "CompleteQuest", "Disable", "DisablePlayerControls", "Enable",
    "EnablePlayerControls", "EquipItem", "GetActorValue", "GetAV", "GetAngle",
    "GetButtonPressed", "GetContainer", "GetCurrentTime", "GetDead",
    "GetDisabled", "GetDistance", "GetGameSetting", "GetInCell", "GetIsID",
    "GetIsReference", "GetItemCount", "GetLocked", "GetObjectiveCompleted",
    "GetOpenState", "GetPos", "GetQuestRunning", "GetSecondsPassed", "GetSelf",
    "GetStage", "GetStageDone", "IsActionRef", "Kill", "Lock", "ModActorValue",
    "ModAV", "MoveTo", "PlaceAtMe", "PlayGroup", "PlaySound", "PlaySound3D",
    "RemoveAllItems", "RemoveItem", "RemoveSpell", "Resurrect", "RewardXP",
    "SetActorValue", "SetAV", "SetAngle", "SetObjectiveCompleted",
    "SetObjectiveDisplayed", "SetPos", "SetStage", "ShowMessage", "StartCombat",
    "StartConversation", "StartQuest", "StopCombat", "StopQuest", "Unlock",
];

/// Fallout Script Extender functions
#[rustfmt::skip]
pub const FOSE_FUNCTIONS: &[&str] = &[
    "CompareNames", "Con_SCOF", "GetBaseObject", "GetEquippedObject",
    "GetFOSEVersion", "GetFOSERevision", "GetHealth", "GetLinkedDoor",
    "GetNumItems", "GetInventoryObject", "GetParentCell", "GetType",
    "GetValue", "GetWeight", "IsControlPressed", "IsKeyPressed", "IsRefEssential",
    "ListAddForm", "ListGetCount", "ListGetFormIndex", "ListGetNthForm",
    "ListRemoveForm", "PrintToConsole", "SetHealth", "SetName", "SetValue",
    "SetWeight", "TapKey",
];

/// Functions added by Fallout: New Vegas
#[rustfmt::skip]
pub const VEGAS_FUNCTIONS: &[&str] = &[
    "AddNote", "ClearOwnership", "DisableAllMines", "EnableReputation",
    "GetCasinoWinningsLevel", "GetChallengeCompleted", "GetHardcore",
    "GetReputation", "GetReputationPct", "GetReputationThreshold",
    "GetVATSValue", "IsHardcore", "MarkForDelete", "ModReputation",
    "RemoveNote", "SetEnableParent", "SetReputation", "ShowChallengeNotification",
    "ShowRecipeMenu", "UnlockChallenge",
];

/// New Vegas Script Extender functions
#[rustfmt::skip]
pub const NVSE_FUNCTIONS: &[&str] = &[
    "Ar_Append", "Ar_Construct", "Ar_Find", "Ar_HasKey", "Ar_Keys", "Ar_List",
    "Ar_Size", "Ar_Sort", "DispatchEventAlt", "GetModIndex", "GetNVSEVersion",
    "GetNVSERevision", "GetEquippedCurrentHealth", "GetUIFloat",
    "IsModLoaded", "Print", "PrintC", "RemoveEventHandler", "SetEventHandler",
    "SetUIFloat", "SetUIString", "Sv_Construct", "Sv_Destruct", "Sv_Find",
    "Sv_Length", "ToNumber", "ToString", "TypeOf",
];

/// NX extension functions
#[rustfmt::skip]
pub const NX_FUNCTIONS: &[&str] = &[
    "NX_ClrEVFl", "NX_ClrEVFo", "NX_GetConversationPartner", "NX_GetEVFl",
    "NX_GetEVFo", "NX_GetEVSt", "NX_GetQVEVFl", "NX_GetRandom", "NX_GetVersion",
    "NX_IsInList", "NX_IsUsingSkeleton", "NX_SetEVFl", "NX_SetEVFo",
    "NX_SetEVSt", "NX_SetConversationPartner",
];

/// A named token list that becomes one highlighting rule
#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyGroup {
    /// Scope name given to matched text (also the rule's name)
    pub scope: String,
    pub tokens: Vec<String>,
    pub case_insensitive: bool,
    /// Flag that must be enabled for the group to be highlighted.
    /// `None` means the group is always on.
    pub gate: Option<FeatureFlag>,
}

impl VocabularyGroup {
    pub fn new<I, S>(scope: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scope: scope.into(),
            tokens: tokens.into_iter().map(Into::into).collect(),
            case_insensitive: false,
            gate: None,
        }
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    pub fn gated_by(mut self, flag: FeatureFlag) -> Self {
        self.gate = Some(flag);
        self
    }
}

/// The GECK groups, in the order their rules are appended
pub fn standard_catalogue() -> Vec<VocabularyGroup> {
    vec![
        VocabularyGroup::new("keyword.geck-keyword", KEYWORDS.iter().copied()),
        VocabularyGroup::new("keyword.control.geck.blocktype", BLOCKTYPES.iter().copied())
            .case_insensitive(),
        VocabularyGroup::new("keyword.geck.baseFns", BASE_FUNCTIONS.iter().copied()),
        VocabularyGroup::new("keyword.geck.foseFns", FOSE_FUNCTIONS.iter().copied())
            .gated_by(FeatureFlag::Fose),
        VocabularyGroup::new("keyword.geck.vegasFns", VEGAS_FUNCTIONS.iter().copied())
            .gated_by(FeatureFlag::Vegas),
        VocabularyGroup::new("keyword.geck.nvseFns", NVSE_FUNCTIONS.iter().copied())
            .gated_by(FeatureFlag::Nvse),
        VocabularyGroup::new("keyword.geck.nxFns", NX_FUNCTIONS.iter().copied())
            .gated_by(FeatureFlag::Nx),
    ]
}
