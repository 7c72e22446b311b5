use crate::models::document::{
    CvDocument, EducationEntry, EntryId, ExperienceEntry, InterestEntry, LanguageEntry,
    LanguageLevel, PersonalInfo, ProjectEntry, SkillEntry, SkillLevel,
};

/// The bundled sample CV offered by "Load Sample CV".
pub fn sample_document() -> CvDocument {
    CvDocument {
        personal_info: PersonalInfo {
            name: "Alex Johnson".to_string(),
            email: "alex.johnson@email.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            location: "San Francisco, CA".to_string(),
            summary: "Full-stack software engineer with 5+ years of experience building \
                      scalable web applications. Proficient in React, Node.js, and cloud \
                      technologies."
                .to_string(),
        },
        education: vec![EducationEntry {
            id: EntryId(1),
            school: "University of California, Berkeley".to_string(),
            degree: "Bachelor of Science".to_string(),
            field: "Computer Science".to_string(),
            start_date: "2017-09".to_string(),
            end_date: "2021-05".to_string(),
            description: "Relevant coursework: Data Structures, Algorithms, Database Systems"
                .to_string(),
        }],
        experience: vec![
            ExperienceEntry {
                id: EntryId(2),
                job_title: "Senior Software Engineer".to_string(),
                company: "Tech Innovations Inc.".to_string(),
                location: "San Francisco, CA".to_string(),
                start_date: "2022-01".to_string(),
                end_date: String::new(),
                currently_working: true,
                description: "• Led development of real-time data processing pipeline\n\
                              • Mentored 3 junior developers"
                    .to_string(),
                years: "3".to_string(),
            },
            ExperienceEntry {
                id: EntryId(3),
                job_title: "Software Engineer".to_string(),
                company: "StartUp Labs".to_string(),
                location: "Oakland, CA".to_string(),
                start_date: "2021-06".to_string(),
                end_date: "2021-12".to_string(),
                currently_working: false,
                description: "• Built the customer dashboard used by 2,000 accounts".to_string(),
                years: "1".to_string(),
            },
        ],
        skills: vec![
            SkillEntry {
                id: EntryId(4),
                name: "JavaScript".to_string(),
                level: SkillLevel::Expert,
            },
            SkillEntry {
                id: EntryId(5),
                name: "React".to_string(),
                level: SkillLevel::Expert,
            },
            SkillEntry {
                id: EntryId(6),
                name: "Node.js".to_string(),
                level: SkillLevel::Advanced,
            },
        ],
        languages: vec![LanguageEntry {
            id: EntryId(7),
            name: "English".to_string(),
            level: LanguageLevel::Native,
        }],
        interests: vec![InterestEntry {
            id: EntryId(8),
            name: "Photography".to_string(),
        }],
        projects: vec![ProjectEntry {
            id: EntryId(9),
            name: "Portfolio Website".to_string(),
            description: "Personal site showcasing open-source work".to_string(),
            technologies: "React, Vite".to_string(),
        }],
    }
}
