//! In-memory stand-ins for the remote services, recording every call.

use std::{collections::HashMap, sync::Mutex};

use error_stack::report;

use crate::{
    domain::{sheets::score_sheet::SheetBlock, slides::grid_layout::PageSize},
    ports::{
        playlist_service::{NewPlaylist, PlaylistService, PlaylistServiceError},
        presentation_service::{
            PredefinedLayout, PresentationService, PresentationServiceError,
            PresentationSnapshot, SlideRequest, SlideSummary,
        },
        spreadsheet_service::{
            SheetRequest, SheetSummary, SpreadsheetService, SpreadsheetServiceError,
        },
    },
};

#[derive(Debug, Default)]
struct Deck {
    slides: Vec<SlideSummary>,
    texts: HashMap<String, String>,
    batches: Vec<Vec<SlideRequest>>,
    next_id: usize,
}

impl Deck {
    fn new_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}_{}", self.next_id)
    }

    fn new_slide(&mut self, layout: PredefinedLayout) -> SlideSummary {
        let object_id = self.new_id("slide");
        let element_ids = match layout {
            PredefinedLayout::Title => vec![self.new_id("title"), self.new_id("subtitle")],
            PredefinedLayout::Blank => Vec::new(),
        };
        SlideSummary {
            object_id,
            element_ids,
        }
    }
}

#[derive(Debug, Default)]
pub struct FakePresentationService {
    deck: Mutex<Deck>,
    pub fail_updates: bool,
}

impl FakePresentationService {
    pub fn failing() -> Self {
        Self {
            fail_updates: true,
            ..Self::default()
        }
    }

    pub fn batches(&self) -> Vec<Vec<SlideRequest>> {
        self.deck.lock().unwrap().batches.clone()
    }

    pub fn text_of(&self, object_id: &str) -> Option<String> {
        self.deck.lock().unwrap().texts.get(object_id).cloned()
    }
}

#[async_trait::async_trait]
impl PresentationService for FakePresentationService {
    async fn create_presentation(
        &self,
        _title: &str,
    ) -> error_stack::Result<String, PresentationServiceError> {
        let mut deck = self.deck.lock().unwrap();
        let slide = deck.new_slide(PredefinedLayout::Title);
        deck.slides.push(slide);
        Ok("presentation_1".to_owned())
    }

    async fn get_presentation(
        &self,
        _presentation_id: &str,
    ) -> error_stack::Result<PresentationSnapshot, PresentationServiceError> {
        Ok(PresentationSnapshot {
            page_size: PageSize {
                width: 9_144_000.0,
                height: 5_143_500.0,
                unit: "EMU".to_owned(),
            },
            slides: self.deck.lock().unwrap().slides.clone(),
        })
    }

    async fn batch_update(
        &self,
        _presentation_id: &str,
        requests: Vec<SlideRequest>,
    ) -> error_stack::Result<Vec<Option<String>>, PresentationServiceError> {
        if self.fail_updates {
            return Err(report!(PresentationServiceError::FailedToUpdatePresentation));
        }

        let mut deck = self.deck.lock().unwrap();
        deck.batches.push(requests.clone());

        let mut replies = Vec::with_capacity(requests.len());
        for request in requests {
            let reply = match request {
                SlideRequest::CreateSlide {
                    layout,
                    insertion_index,
                } => {
                    let slide = deck.new_slide(layout);
                    let id = slide.object_id.clone();
                    match insertion_index {
                        Some(index) => deck.slides.insert(index as usize, slide),
                        None => deck.slides.push(slide),
                    }
                    Some(id)
                }
                SlideRequest::InsertText { object_id, text } => {
                    deck.texts.insert(object_id, text);
                    None
                }
                SlideRequest::DeleteObject { object_id } => {
                    deck.slides.retain(|slide| slide.object_id != object_id);
                    for slide in deck.slides.iter_mut() {
                        slide.element_ids.retain(|id| *id != object_id);
                    }
                    None
                }
                SlideRequest::CreateVideo { page_object_id, .. } => {
                    let id = deck.new_id("video");
                    let slide = deck
                        .slides
                        .iter_mut()
                        .find(|slide| slide.object_id == page_object_id)
                        .ok_or(report!(PresentationServiceError::FailedToUpdatePresentation))?;
                    slide.element_ids.push(id.clone());
                    Some(id)
                }
                SlideRequest::UpdateVideoProperties { .. } => None,
            };
            replies.push(reply);
        }
        Ok(replies)
    }
}

#[derive(Debug, Default)]
struct Workbook {
    sheets: Vec<SheetSummary>,
    written: Vec<SheetBlock>,
    next_id: i32,
}

#[derive(Debug, Default)]
pub struct FakeSpreadsheetService {
    workbook: Mutex<Workbook>,
}

impl FakeSpreadsheetService {
    pub fn sheet_titles(&self) -> Vec<String> {
        self.workbook
            .lock()
            .unwrap()
            .sheets
            .iter()
            .map(|sheet| sheet.title.clone())
            .collect()
    }

    pub fn written(&self) -> Vec<SheetBlock> {
        self.workbook.lock().unwrap().written.clone()
    }
}

#[async_trait::async_trait]
impl SpreadsheetService for FakeSpreadsheetService {
    async fn create_spreadsheet(
        &self,
        _title: &str,
    ) -> error_stack::Result<String, SpreadsheetServiceError> {
        let mut workbook = self.workbook.lock().unwrap();
        workbook.sheets.push(SheetSummary {
            sheet_id: 0,
            title: "Sheet1".to_owned(),
        });
        workbook.next_id = 1;
        Ok("spreadsheet_1".to_owned())
    }

    async fn list_sheets(
        &self,
        _spreadsheet_id: &str,
    ) -> error_stack::Result<Vec<SheetSummary>, SpreadsheetServiceError> {
        Ok(self.workbook.lock().unwrap().sheets.clone())
    }

    async fn batch_update(
        &self,
        _spreadsheet_id: &str,
        requests: Vec<SheetRequest>,
    ) -> error_stack::Result<Vec<Option<i32>>, SpreadsheetServiceError> {
        let mut workbook = self.workbook.lock().unwrap();
        let mut replies = Vec::with_capacity(requests.len());
        for request in requests {
            match request {
                SheetRequest::AddSheet { title, index } => {
                    let sheet_id = workbook.next_id;
                    workbook.next_id += 1;
                    let sheet = SheetSummary { sheet_id, title };
                    match index {
                        Some(index) => workbook.sheets.insert(index as usize, sheet),
                        None => workbook.sheets.push(sheet),
                    }
                    replies.push(Some(sheet_id));
                }
                SheetRequest::DeleteSheet { sheet_id } => {
                    workbook.sheets.retain(|sheet| sheet.sheet_id != sheet_id);
                    replies.push(None);
                }
            }
        }
        Ok(replies)
    }

    async fn write_blocks(
        &self,
        _spreadsheet_id: &str,
        blocks: &[SheetBlock],
    ) -> error_stack::Result<(), SpreadsheetServiceError> {
        self.workbook
            .lock()
            .unwrap()
            .written
            .extend_from_slice(blocks);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FakePlaylistService {
    playlists: Mutex<Vec<(NewPlaylist, Vec<String>)>>,
    /// Video id whose insertion fails
    pub reject_video: Option<String>,
}

impl FakePlaylistService {
    pub fn rejecting(video_id: &str) -> Self {
        Self {
            reject_video: Some(video_id.to_owned()),
            ..Self::default()
        }
    }

    pub fn playlists(&self) -> Vec<(NewPlaylist, Vec<String>)> {
        self.playlists.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PlaylistService for FakePlaylistService {
    async fn create_playlist(
        &self,
        playlist: &NewPlaylist,
    ) -> error_stack::Result<String, PlaylistServiceError> {
        let mut playlists = self.playlists.lock().unwrap();
        playlists.push((playlist.clone(), Vec::new()));
        Ok(format!("playlist_{}", playlists.len()))
    }

    async fn insert_video(
        &self,
        playlist_id: &str,
        video_id: &str,
    ) -> error_stack::Result<(), PlaylistServiceError> {
        if self.reject_video.as_deref() == Some(video_id) {
            return Err(report!(PlaylistServiceError::FailedToInsertVideo(
                video_id.to_owned()
            )));
        }

        let index = playlist_id
            .trim_start_matches("playlist_")
            .parse::<usize>()
            .map_err(|_| report!(PlaylistServiceError::MissingField("playlist")))?;
        let mut playlists = self.playlists.lock().unwrap();
        let (_, videos) = playlists
            .get_mut(index - 1)
            .ok_or(report!(PlaylistServiceError::MissingField("playlist")))?;
        videos.push(video_id.to_owned());
        Ok(())
    }
}
