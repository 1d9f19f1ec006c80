#![allow(dead_code)]
use serde::{Deserialize, Serialize};

choice_enum! {
    Gender {
        Male => ("MALE", "남"),
        Female => ("FEMALE", "여"),
    }
}

choice_enum! {
    MilitaryStatus {
        NotApplicable => ("NOT_APPLICABLE", "비대상"),
        Completed => ("COMPLETED", "군필"),
        NotCompleted => ("NOT_COMPLETED", "미필"),
        Exempted => ("EXEMPTED", "면제"),
        Serving => ("SERVING", "복무중"),
    }
}

impl MilitaryStatus {
    /// Only completed or ongoing service carries service type, branch, rank and period.
    pub fn requires_service_details(self) -> bool {
        matches!(self, MilitaryStatus::Completed | MilitaryStatus::Serving)
    }
}

choice_enum! {
    ServiceType {
        Army => ("ARMY", "육군"),
        Navy => ("NAVY", "해군"),
        AirForce => ("AIR_FORCE", "공군"),
        MarineCorps => ("MARINE_CORPS", "해병대"),
        PublicService => ("PUBLIC_SERVICE", "공익근무요원"),
        Alternative => ("ALTERNATIVE", "병역특례복무"),
    }
}

choice_enum! {
    Branch {
        Infantry => ("INFANTRY", "보병"),
        Armor => ("ARMOR", "기갑"),
        Artillery => ("ARTILLERY", "포병"),
        AirDefense => ("AIR_DEFENSE", "방공"),
        ArmyAviation => ("ARMY_AVIATION", "항공"),
        SpecialForces => ("SPECIAL_FORCES", "특전사"),
        Engineer => ("ENGINEER", "공병"),
        Signal => ("SIGNAL", "통신"),
        MilitaryIntelligence => ("MILITARY_INTELLIGENCE", "정보"),
        Chemical => ("CHEMICAL", "화학"),
        PsychologicalWarfare => ("PSYCHOLOGICAL_WARFARE", "심리전"),
        Quartermaster => ("QUARTERMASTER", "병참"),
        Ordnance => ("ORDNANCE", "병기"),
        Transportation => ("TRANSPORTATION", "수송"),
        AdjutantGeneral => ("ADJUTANT_GENERAL", "인사행정"),
        JudgeAdvocate => ("JUDGE_ADVOCATE", "군법무"),
        MilitaryPolice => ("MILITARY_POLICE", "헌병"),
        Medical => ("MEDICAL", "의무"),
        Chaplain => ("CHAPLAIN", "군종"),
    }
}

choice_enum! {
    Rank {
        Private => ("PRIVATE", "이등병"),
        PrivateFirstClass => ("PRIVATE_FIRST_CLASS", "일등병"),
        Corporal => ("CORPORAL", "상병"),
        Sergeant => ("SERGEANT", "병장"),
        StaffSergeant => ("STAFF_SERGEANT", "하사"),
        SergeantFirstClass => ("SERGEANT_FIRST_CLASS", "중사"),
        MasterSergeant => ("MASTER_SERGEANT", "상사"),
        SergeantMajor => ("SERGEANT_MAJOR", "원사"),
        SecondLieutenant => ("SECOND_LIEUTENANT", "소위"),
        FirstLieutenant => ("FIRST_LIEUTENANT", "중위"),
        Captain => ("CAPTAIN", "대위"),
        Major => ("MAJOR", "소령"),
        LieutenantColonel => ("LIEUTENANT_COLONEL", "중령"),
        Colonel => ("COLONEL", "대령"),
        BrigadierGeneral => ("BRIGADIER_GENERAL", "준장"),
        MajorGeneral => ("MAJOR_GENERAL", "소장"),
        LieutenantGeneral => ("LIEUTENANT_GENERAL", "중장"),
        General => ("GENERAL", "대장"),
    }
}

choice_enum! {
    VeteranEligibility {
        Eligible => ("ELIGIBLE", "보훈 대상"),
        Ineligible => ("INELIGIBLE", "보훈 비대상"),
    }
}

choice_enum! {
    DisabilityLevel {
        Severe => ("SEVERE", "심한 장애인"),
        NotSevere => ("NOT_SEVERE", "심하지 않은 장애인"),
    }
}

choice_enum! {
    /// Registered disability categories. The backend keys them by their Korean name.
    DisabilityType {
        Liver => ("간장애", "간장애"),
        Epilepsy => ("뇌전증장애(간질장애)", "뇌전증장애(간질장애)"),
        BrainLesion => ("뇌병변장애", "뇌병변장애"),
        Visual => ("시각장애", "시각장애"),
        Kidney => ("신장장애", "신장장애"),
        Heart => ("심장장애", "심장장애"),
        FacialDisfigurement => ("안면변형장애", "안면변형장애"),
        Ostomy => ("장루/요루장애", "장루/요루장애"),
        Mental => ("정신장애", "정신장애"),
        Hearing => ("청각장애", "청각장애"),
        Respiratory => ("호흡기장애", "호흡기장애"),
        Physical => ("지체장애", "지체장애"),
        Speech => ("언어장애", "언어장애"),
        Intellectual => ("지적장애(정신지체)", "지적장애(정신지체)"),
        Autism => ("자폐성장애(발달장애)", "자폐성장애(발달장애)"),
        Other => ("기타장애", "기타장애"),
    }
}

/// Veteran benefit ratio in percent. Serialized as the bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum VeteranRatio {
    #[default]
    Zero,
    Five,
    Ten,
}

impl VeteranRatio {
    pub const ALL: [VeteranRatio; 3] = [VeteranRatio::Zero, VeteranRatio::Five, VeteranRatio::Ten];

    pub fn percent(self) -> u8 {
        match self {
            VeteranRatio::Zero => 0,
            VeteranRatio::Five => 5,
            VeteranRatio::Ten => 10,
        }
    }
}

impl From<VeteranRatio> for u8 {
    fn from(ratio: VeteranRatio) -> Self {
        ratio.percent()
    }
}

impl TryFrom<u8> for VeteranRatio {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(VeteranRatio::Zero),
            5 => Ok(VeteranRatio::Five),
            10 => Ok(VeteranRatio::Ten),
            other => Err(format!("veteran ratio must be 0, 5 or 10 (got {other})")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_service_details() {
        assert!(MilitaryStatus::Completed.requires_service_details());
        assert!(MilitaryStatus::Serving.requires_service_details());
        assert!(!MilitaryStatus::Exempted.requires_service_details());
        assert!(!MilitaryStatus::NotApplicable.requires_service_details());
        assert!(!MilitaryStatus::NotCompleted.requires_service_details());
    }

    #[test]
    fn test_veteran_ratio_serializes_as_number() {
        assert_eq!(serde_json::to_string(&VeteranRatio::Ten).unwrap(), "10");
        let parsed: VeteranRatio = serde_json::from_str("5").unwrap();
        assert_eq!(parsed, VeteranRatio::Five);
        assert!(serde_json::from_str::<VeteranRatio>("7").is_err());
    }

    #[test]
    fn test_disability_type_wire_code_is_korean_name() {
        let json = serde_json::to_string(&DisabilityType::Ostomy).unwrap();
        assert_eq!(json, "\"장루/요루장애\"");
    }
}
