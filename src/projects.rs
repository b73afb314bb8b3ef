//! Static portfolio project registry. Everything the portfolio grid, the
//! project overlay and the media viewer need to render a project lives here,
//! so routing can validate ids without touching the DOM.

use crate::i18n::Tr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectGroup {
    Web,
    Software,
    Graphics,
}

impl ProjectGroup {
    pub fn header(self) -> Tr {
        match self {
            ProjectGroup::Web => Tr::new("WEB", "ВЕБ"),
            ProjectGroup::Software => Tr::new("SOFTWARE", "СОФТ"),
            ProjectGroup::Graphics => Tr::new("GRAPHICS", "ГРАФИКА"),
        }
    }
}

/// A numbered image sequence under `projects/<id>/`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gallery {
    /// File name stem, e.g. `vehicletools` produces `vehicletools-1.png`.
    pub stem: &'static str,
    pub ext: &'static str,
    pub count: usize,
    pub width: u32,
    pub height: u32,
    /// Letterboxed (`contain`) instead of cropped (`cover`).
    pub contain: bool,
}

impl Gallery {
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    pub fn image_path(&self, project_id: &str, index: usize) -> String {
        format!(
            "/projects/{}/{}-{}.{}",
            project_id,
            self.stem,
            index + 1,
            self.ext
        )
    }
}

/// A source file shown in the code viewer and offered for download.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectFile {
    pub path: &'static str,
    /// Syntax token for highlighting, e.g. `lua`.
    pub language: &'static str,
    /// Text encoding the file was authored in.
    pub encoding: &'static str,
}

impl ProjectFile {
    pub fn name(&self) -> &'static str {
        self.path.rsplit('/').next().unwrap_or(self.path)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectLink {
    pub title: Tr,
    pub description: Tr,
    pub url: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Project {
    pub id: &'static str,
    pub title: Tr,
    pub group: ProjectGroup,
    pub description: Tr,
    pub dates: &'static [Tr],
    /// Game the mod targets, when the project is a game mod.
    pub game: Option<&'static str>,
    pub supported_languages: Option<Tr>,
    pub gallery: Option<Gallery>,
    pub captions: &'static [Tr],
    /// YouTube embed URL for the overlay video block.
    pub video: Option<&'static str>,
    pub files: &'static [ProjectFile],
    pub links: &'static [ProjectLink],
}

const CUSTOM_INTERFACE_CAPTIONS: &[Tr] = &[
    Tr::new("SETTINGS: Home Page", "НАСТРОЙКИ: Главная страница"),
    Tr::new("SETTINGS: Information", "НАСТРОЙКИ: Информация"),
    Tr::new(
        "SETTINGS: Information >> Changelog",
        "НАСТРОЙКИ: Информация >> Изменения",
    ),
    Tr::new(
        "SETTINGS: Additional Settings",
        "НАСТРОЙКИ: Дополнительные настройки",
    ),
    Tr::new(
        "SETTINGS: Interface >> Radar",
        "НАСТРОЙКИ: Интерфейс >> Радар",
    ),
    Tr::new(
        "SETTINGS: Interface >> Crosshair",
        "НАСТРОЙКИ: Интерфейс >> Прицел",
    ),
    Tr::new(
        "SETTINGS: Widgets >> Date and Time",
        "НАСТРОЙКИ: Виджеты >> Дата и время",
    ),
    Tr::new(
        "SETTINGS: Widgets >> Frames per Second",
        "НАСТРОЙКИ: Виджеты >> Кадры в секунду",
    ),
    Tr::new("SETTINGS: Notification", "НАСТРОЙКИ: Уведомление"),
    Tr::new("HUD", "HUD"),
    Tr::new("HUD", "HUD"),
    Tr::new("HUD", "HUD"),
    Tr::new("Radar", "Радар"),
    Tr::new("Crosshair", "Прицел"),
    Tr::new("Speedometer", "Спидометр"),
    Tr::new("Scoreboard", "Таблица онлайна"),
    Tr::new("Scoreboard", "Таблица онлайна"),
    Tr::new("Scoreboard", "Таблица онлайна"),
    Tr::new("Information Window", "Информационное окно"),
    Tr::new("Date and Time", "Дата и время"),
    Tr::new("Frames per Second", "Кадры в секунду"),
];

const VEHICLETOOLS_CAPTIONS: &[Tr] = &[
    Tr::new("SETTINGS: Main", "НАСТРОЙКИ: Основные"),
    Tr::new("SETTINGS: Main", "НАСТРОЙКИ: Основные"),
    Tr::new("SETTINGS: Main", "НАСТРОЙКИ: Основные"),
    Tr::new("SETTINGS: Main", "НАСТРОЙКИ: Основные"),
    Tr::new("SETTINGS: Cheats", "НАСТРОЙКИ: Читы"),
    Tr::new("SETTINGS: Information", "НАСТРОЙКИ: Информация"),
    Tr::new(
        "SETTINGS: Confirmation Window",
        "НАСТРОЙКИ: Окно подтверждения",
    ),
    Tr::new(
        "SETTINGS: Vehicle Color IDs Window",
        "НАСТРОЙКИ: Окно с ID цветов транспортных средств",
    ),
    Tr::new("SETTINGS: Notification", "НАСТРОЙКИ: Уведомление"),
    Tr::new("Visual Modifications", "Визуальные модификации"),
    Tr::new("Visual Modifications", "Визуальные модификации"),
];

const BLASTHACK_LINK_TITLE: Tr = Tr::new("Thread on BlastHack", "Тема на BlastHack");
const BLASTHACK_LINK_DESC: Tr = Tr::new(
    "Detailed forum thread covering: feature descriptions, requirements, \
     installation instructions, a changelog with version history and \
     community discussion with questions and answers.",
    "Подробная тема на форуме, включающая: описание функций, требования, \
     инструкции по установке, список изменений с историей версий и \
     обсуждение сообщества с вопросами и ответами.",
);

pub const PROJECTS: &[Project] = &[
    Project {
        id: "personal-website",
        title: Tr::new("Personal Website", "Личный сайт"),
        group: ProjectGroup::Web,
        description: Tr::new(
            "<b>Description:</b> Custom single-page application with routing, \
             state management, forms and validation. Fully responsive with a \
             custom UI and UX for desktop and touch devices. Features a modern \
             design, smooth animations, an image gallery and a code viewer. \
             Integrates a GPT-based AI chat with conversation context. The \
             backend uses SQLite to store the necessary data, including daily \
             GPT token limits. Users are identified and rate-limited without \
             classic authorization, using UIDs and device fingerprints.",
            "<b>Описание:</b> Кастомное одностраничное приложение с реализацией \
             роутинга, управления состоянием, форм и валидации. Полностью \
             адаптивное с кастомным UI и UX для десктопа и тач-устройств. \
             Включает современный дизайн, плавные анимации, галерею изображений \
             и просмотр кода. Интегрирован ИИ-чат на базе GPT с сохранением \
             контекста. Backend использует SQLite для хранения необходимых \
             данных, включая дневные лимиты GPT-токенов. Идентификация \
             пользователей и управление лимитами без классической авторизации с \
             использованием UID и отпечатков устройств.",
        ),
        dates: &[
            Tr::new(
                "<b>Development:</b> 30 Aug 2025 &mdash; 2 Dec 2025",
                "<b>Разработка:</b> 30 Авг 2025 &mdash; 2 Дек 2025",
            ),
            Tr::new(
                "<b>Support:</b> Ongoing",
                "<b>Поддержка:</b> В процессе",
            ),
        ],
        game: None,
        supported_languages: Some(Tr::new(
            "<b>Supported languages:</b> English, Russian",
            "<b>Поддерживаемые языки:</b> Английский, Русский",
        )),
        gallery: None,
        captions: &[],
        video: None,
        files: &[],
        links: &[ProjectLink {
            title: Tr::new("You are already here!", "Вы уже здесь!"),
            description: Tr::new(
                "But here is the link, just in case\u{2026}",
                "Но вот ссылка, если хотите\u{2026}",
            ),
            url: "https://breddlane.dev",
        }],
    },
    Project {
        id: "custom-interface",
        title: Tr::new("Custom Interface", "Custom Interface"),
        group: ProjectGroup::Software,
        description: Tr::new(
            "<b>Description:</b> Enhances the game interface with configurable \
             HUD elements and widgets, a Windows 10 styled settings menu and a \
             built-in auto-update, all built on ImGui. One update was released \
             after launch.",
            "<b>Описание:</b> Улучшает интерфейс игры с настраиваемыми \
             элементами HUD и виджетами, включает меню настроек в стиле \
             Windows 10 и встроенное автообновление, всё на базе ImGui. Одно \
             обновление было выпущено после релиза.",
        ),
        dates: &[
            Tr::new(
                "<b>Development:</b> 11 Oct 2020 &mdash; 29 Nov 2020",
                "<b>Разработка:</b> 11 Окт 2020 &mdash; 29 Нов 2020",
            ),
            Tr::new(
                "<b>Support:</b> until Feb 2021",
                "<b>Поддержка:</b> до Фев 2021",
            ),
        ],
        game: Some("GTA: San Andreas Multiplayer"),
        supported_languages: Some(Tr::new(
            "<b>Supported language:</b> Russian",
            "<b>Поддерживаемый язык:</b> Русский",
        )),
        gallery: Some(Gallery {
            stem: "custominterface",
            ext: "png",
            count: 21,
            width: 1920,
            height: 1080,
            contain: false,
        }),
        captions: CUSTOM_INTERFACE_CAPTIONS,
        video: Some("https://www.youtube.com/embed/0yEq5oLkMic"),
        files: &[ProjectFile {
            path: "/projects/custom-interface/CustomInterface.lua",
            language: "lua",
            encoding: "windows-1251",
        }],
        links: &[ProjectLink {
            title: BLASTHACK_LINK_TITLE,
            description: BLASTHACK_LINK_DESC,
            url: "https://www.blast.hk/threads/51597/",
        }],
    },
    Project {
        id: "vehicletools",
        title: Tr::new("VehicleTools", "VehicleTools"),
        group: ProjectGroup::Software,
        description: Tr::new(
            "<b>Description:</b> Provides in-game tools for advanced vehicle \
             interaction with configurable features, a convenient interface \
             and a built-in auto-update system based on ImGui. Received 17 \
             updates after launch, 5 of which added new features.",
            "<b>Описание:</b> Предоставляет внутриигровые инструменты для \
             продвинутого взаимодействия с транспортными средствами с \
             настраиваемыми функциями, удобным интерфейсом и встроенной \
             системой автообновления на базе ImGui. Включает 17 обновлений \
             после релиза, из которых 5 добавляли новые функции.",
        ),
        dates: &[
            Tr::new(
                "<b>Development:</b> 8 Jun 2020 &mdash; 6 Jul 2020",
                "<b>Разработка:</b> 8 Июн 2020 &mdash; 6 Июл 2020",
            ),
            Tr::new(
                "<b>Support:</b> until Dec 2020",
                "<b>Поддержка:</b> до Дек 2020",
            ),
        ],
        game: Some("GTA: San Andreas Multiplayer"),
        supported_languages: Some(Tr::new(
            "<b>Supported language:</b> Russian",
            "<b>Поддерживаемый язык:</b> Русский",
        )),
        gallery: Some(Gallery {
            stem: "vehicletools",
            ext: "png",
            count: 11,
            width: 1920,
            height: 1080,
            contain: false,
        }),
        captions: VEHICLETOOLS_CAPTIONS,
        video: None,
        files: &[ProjectFile {
            path: "/projects/vehicletools/VehicleTools.lua",
            language: "lua",
            encoding: "windows-1251",
        }],
        links: &[ProjectLink {
            title: BLASTHACK_LINK_TITLE,
            description: BLASTHACK_LINK_DESC,
            url: "https://www.blast.hk/threads/36968/",
        }],
    },
    Project {
        id: "personal-logo",
        title: Tr::new("Personal Logo", "Личный логотип"),
        group: ProjectGroup::Graphics,
        description: Tr::new(
            "<b>Description:</b> Intertwined letters B and L, where the \
             vertical stroke of the B joins the vertical stroke of the L, \
             slightly extended to the left for visual balance. The letter ends \
             taper smoothly into soft, feather-like points, and the overall \
             rounded shape resembles a boat with a sail. A shooting star on \
             the right references earlier versions of the logo and adds \
             compositional harmony.",
            "<b>Описание:</b> Переплетённые буквы B и L, где вертикальная \
             линия B соединяется с вертикальной линией L, которая слегка \
             удлинена слева для визуального баланса. Концы букв плавно \
             сужаются в мягкие, пероподобные точки, а общая округлая форма \
             напоминает лодку с парусом. Справа расположена падающая звезда, \
             отсылающая к предыдущим версиям логотипа и добавляющая \
             композиционной гармонии.",
        ),
        dates: &[Tr::new(
            "<b>Date:</b> 21 Sep 2025",
            "<b>Дата:</b> 21 Сен 2025",
        )],
        game: None,
        supported_languages: None,
        gallery: Some(Gallery {
            stem: "personallogo",
            ext: "svg",
            count: 1,
            width: 2880,
            height: 2400,
            contain: true,
        }),
        captions: &[],
        video: None,
        files: &[],
        links: &[],
    },
];

pub fn find(id: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|p| p.id == id)
}

pub fn in_group(group: ProjectGroup) -> impl Iterator<Item = &'static Project> {
    PROJECTS.iter().filter(move |p| p.group == group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Lang;

    #[test]
    fn lookup_by_id() {
        assert!(find("vehicletools").is_some());
        assert!(find("personal-website").is_some());
        assert!(find("VehicleTools").is_none());
        assert!(find("missing").is_none());
    }

    #[test]
    fn captions_cover_every_gallery_image() {
        for project in PROJECTS {
            let Some(gallery) = project.gallery else {
                continue;
            };
            if !project.captions.is_empty() {
                assert_eq!(
                    project.captions.len(),
                    gallery.count,
                    "caption count mismatch for {}",
                    project.id
                );
            }
        }
    }

    #[test]
    fn gallery_paths_are_one_based() {
        let project = find("vehicletools").unwrap();
        let gallery = project.gallery.unwrap();
        assert_eq!(
            gallery.image_path(project.id, 0),
            "/projects/vehicletools/vehicletools-1.png"
        );
        assert_eq!(
            gallery.image_path(project.id, 10),
            "/projects/vehicletools/vehicletools-11.png"
        );
    }

    #[test]
    fn file_names_strip_directories() {
        let project = find("custom-interface").unwrap();
        assert_eq!(project.files[0].name(), "CustomInterface.lua");
    }

    #[test]
    fn group_headers_translate() {
        assert_eq!(ProjectGroup::Web.header().get(Lang::Ru), "ВЕБ");
        assert_eq!(in_group(ProjectGroup::Software).count(), 2);
    }
}
