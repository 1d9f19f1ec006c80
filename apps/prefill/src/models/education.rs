#![allow(dead_code)]
choice_enum! {
    EducationLevel {
        Ged => ("GED", "검정고시"),
        HighSchool => ("HIGH_SCHOOL", "고등학교"),
        University => ("UNIVERSITY", "대학교"),
        GraduateSchool => ("GRADUATE_SCHOOL", "대학원"),
    }
}

impl EducationLevel {
    /// Major details exist only for university and graduate school records.
    pub fn allows_major(self) -> bool {
        matches!(
            self,
            EducationLevel::University | EducationLevel::GraduateSchool
        )
    }
}

choice_enum! {
    AdmissionType {
        Entrance => ("ENTRANCE", "입학"),
        Transfer => ("TRANSFER", "편입"),
    }
}

choice_enum! {
    GraduationType {
        Graduated => ("GRADUATED", "졸업"),
        Bachelor => ("BACHELOR", "학사"),
        Master => ("MASTER", "석사"),
        Doctor => ("DOCTOR", "박사"),
        Completed => ("COMPLETED", "수료"),
        Expected => ("EXPECTED", "졸업예정"),
        Enrolled => ("ENROLLED", "재학중"),
        LeaveOfAbsence => ("LEAVE_OF_ABSENCE", "휴학"),
        DroppedOut => ("DROPPED_OUT", "중퇴"),
    }
}

choice_enum! {
    ClassTimeType {
        Day => ("DAY", "주간"),
        Night => ("NIGHT", "야간"),
    }
}

choice_enum! {
    SchoolBranch {
        MainCampus => ("MAIN_CAMPUS", "본교"),
        SatelliteCampus => ("SATELLITE_CAMPUS", "분교"),
    }
}

choice_enum! {
    SchoolLocation {
        Seoul => ("SEOUL", "서울"),
        Busan => ("BUSAN", "부산"),
        Daegu => ("DAEGU", "대구"),
        Incheon => ("INCHEON", "인천"),
        Gwangju => ("GWANGJU", "광주"),
        Daejeon => ("DAEJEON", "대전"),
        Ulsan => ("ULSAN", "울산"),
        Gyeonggi => ("GYEONGGI", "경기"),
        Gangwon => ("GANGWON", "강원"),
        Chungbuk => ("CHUNGBUK", "충북"),
        Chungnam => ("CHUNGNAM", "충남"),
        Jeonbuk => ("JEONBUK", "전북"),
        Jeonnam => ("JEONNAM", "전남"),
        Gyeongbuk => ("GYEONGBUK", "경북"),
        Gyeongnam => ("GYEONGNAM", "경남"),
        Jeju => ("JEJU", "제주"),
        Sejong => ("SEJONG", "세종"),
        Usa => ("USA", "미국"),
        Japan => ("JAPAN", "일본"),
    }
}

choice_enum! {
    MajorKind {
        Main => ("MAIN", "주전공"),
        Plural => ("PLURAL", "복수전공"),
        Sub => ("SUB", "부전공"),
        Linkage => ("LINKAGE", "연계전공"),
        Fusion => ("FUSION", "융합전공"),
    }
}
