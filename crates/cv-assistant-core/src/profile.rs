//! Static profile content shown in the side panel and chat header.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Profile {
    pub name: &'static str,
    pub title: &'static str,
    pub badges: &'static [&'static str],
    pub bio: &'static str,
    pub skills_heading: &'static str,
    pub skills: &'static [&'static str],
    pub expertise_heading: &'static str,
    pub expertise: &'static [&'static str],
    /// Served by the asset host, shown as a path only
    pub avatar_path: &'static str,
    pub cv_label: &'static str,
    pub cv_path: &'static str,
    pub social_links: &'static [SocialLink],
    pub copyright: &'static str,

    pub header_title: &'static str,
    pub header_subtitle: &'static str,
    /// Seed assistant message
    pub greeting: &'static str,
    pub input_placeholder: &'static str,
    pub quick_questions: &'static [&'static str],
}

pub const DEFAULT_PROFILE: Profile = Profile {
    name: "Meltem Öztürkcan",
    title: "Full Stack .NET & AI Developer",
    badges: &["İstanbul, Türkiye", "2+ Yıl Deneyim"],
    bio: "Mikroservis mimarileri ve AI destekli sistemlerde uzman, modern teknolojilerle \
          ölçeklenebilir çözümler üreten full-stack geliştirici.",
    skills_heading: "Teknik Yetenekler",
    skills: &[
        "C#",
        ".NET Core",
        "AI/ML",
        "Python",
        "Web API",
        "Microservices",
        "React",
        "Azure",
        "Docker",
        "PostgreSQL",
        "MSSQL",
        "GitHub",
    ],
    expertise_heading: "Uzmanlık Alanları",
    expertise: &[
        "Full Stack .NET Development",
        "AI/ML Integration",
        "DevOps & Cloud",
        "Frontend & UI/UX",
    ],
    avatar_path: "/meltem.png",
    cv_label: "📄 Özgeçmişi İncele",
    cv_path: "/cv.pdf",
    social_links: &[
        SocialLink {
            label: "LI",
            url: "https://linkedin.com",
        },
        SocialLink {
            label: "GH",
            url: "https://github.com",
        },
    ],
    copyright: "© 2025 Meltem Öztürkcan",

    header_title: "Meltem AI - Özgeçmiş Asistanı",
    header_subtitle: "Meltem’in kariyeri hakkında sorularınızı yanıtlamaya hazırım.",
    greeting: "Merhaba. Ben Meltem Öztürkcan’ın profesyonel özgeçmiş asistanıyım. \
               Bilgi almak istediğiniz konuyla ilgili sorunuzu paylaşabilirsiniz.",
    input_placeholder: "Sorunuzu yazın...",
    quick_questions: &[
        "Teknik yetkinlikleriniz neler?",
        "İş deneyiminizi özetleyebilir misiniz?",
        "Yer aldığınız projelerden bahsedebilir misiniz?",
        "Eğitim geçmişinizi paylaşabilir misiniz?",
    ],
};

impl Default for Profile {
    fn default() -> Self {
        DEFAULT_PROFILE
    }
}

impl Profile {
    pub fn quick_question(&self, index: usize) -> Option<&'static str> {
        self.quick_questions.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_content() {
        let profile = Profile::default();
        assert_eq!(profile.quick_questions.len(), 4);
        assert_eq!(profile.skills.len(), 12);
        assert!(profile.greeting.starts_with("Merhaba."));
        assert!(!profile.greeting.contains("  "));
    }

    #[test]
    fn test_quick_question_lookup() {
        let profile = Profile::default();
        assert_eq!(profile.quick_question(0), Some("Teknik yetkinlikleriniz neler?"));
        assert_eq!(profile.quick_question(4), None);
    }
}
