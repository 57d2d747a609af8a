//! In-memory catalog for handler tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use charview_core::{
    CatalogClientPort, CatalogPage, CatalogPortError, CatalogPortResult, Character, CharacterId,
    CharacterStatus, FilterSet, REMOTE_PAGE_SIZE,
};

/// Serves `count` generated characters 20 per page, filtering by name.
pub struct FakeCatalog {
    characters: Vec<Character>,
    requests: Mutex<Vec<(u32, FilterSet)>>,
    failing: AtomicBool,
}

impl FakeCatalog {
    /// Every third character is a Rick, the rest are Mortys.
    pub fn with_count(count: u32) -> Self {
        let characters = (1..=count)
            .map(|id| {
                let name = if id % 3 == 0 {
                    format!("Rick {id}")
                } else {
                    format!("Morty {id}")
                };
                Character::new(id, name)
                    .with_status(CharacterStatus::Alive)
                    .with_species("Human")
            })
            .collect();
        Self {
            characters,
            requests: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every request fail with a network error until switched off.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Remote pages requested so far, in order.
    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(page, _)| *page)
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Filters sent with the most recent request.
    pub fn last_filters(&self) -> Option<FilterSet> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|(_, filters)| filters.clone())
    }
}

#[async_trait]
impl CatalogClientPort for FakeCatalog {
    async fn fetch_page(&self, page: u32, filters: &FilterSet) -> CatalogPortResult<CatalogPage> {
        self.requests.lock().unwrap().push((page, filters.clone()));
        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogPortError::Network {
                message: "connection refused".to_string(),
            });
        }

        let needle = filters.name.trim().to_lowercase();
        let matching: Vec<&Character> = self
            .characters
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect();

        let size = REMOTE_PAGE_SIZE as usize;
        let start = (page.max(1) as usize - 1) * size;
        if page == 0 || start >= matching.len() {
            return Err(CatalogPortError::NotFound {
                resource: format!("character?page={page}"),
            });
        }

        let total = matching.len();
        Ok(CatalogPage {
            records: matching[start..(start + size).min(total)]
                .iter()
                .map(|c| (*c).clone())
                .collect(),
            total_count: total as u64,
            total_pages: total.div_ceil(size) as u32,
        })
    }

    async fn fetch_character(&self, id: CharacterId) -> CatalogPortResult<Character> {
        self.characters
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| CatalogPortError::NotFound {
                resource: format!("character/{id}"),
            })
    }
}
