//! First construction of a parsed file under contention.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use parking_lot::Mutex;
use rayon::prelude::*;
use syster_view::lang::{FileType, ParserDefinition, ParserDefinitions};
use syster_view::parser::{GreenNode, TokenParserDefinition, parse_tokens};
use syster_view::project::Project;
use syster_view::vfs::{FileSizeLimits, LightVirtualFile};
use syster_view::{ParsedFile, Result, ViewProvider};

use crate::helpers::projects::{MIB, foo, foo_type};

const THREADS: usize = 10;

/// Holds every caller inside construction until all of them got there, and
/// keeps the invalidation counter of every candidate it built.
#[derive(Clone)]
struct Rendezvous {
    barrier: Arc<Barrier>,
    candidates: Arc<Mutex<Vec<Arc<AtomicU32>>>>,
}

impl ParserDefinition for Rendezvous {
    fn parse(&self, text: &str) -> GreenNode {
        parse_tokens(text)
    }

    fn create_file(&self, provider: &ViewProvider) -> Result<Option<ParsedFile>> {
        let candidate = ParsedFile::language_parsed(provider);
        self.candidates.lock().push(candidate.invalidation_counter());
        self.barrier.wait();
        Ok(Some(candidate))
    }
}

fn provider_with(definition: impl ParserDefinition + 'static) -> Arc<ViewProvider> {
    let mut definitions = ParserDefinitions::new();
    definitions.register(foo(), definition);
    let project = Project::builder()
        .limits(FileSizeLimits::new(MIB, MIB))
        .parser_definitions(definitions)
        .build();
    let file = Arc::new(LightVirtualFile::new("x.foo", foo_type(), "a b c"));
    project.view_provider(file)
}

#[test]
fn test_concurrent_first_construction() {
    let rendezvous = Rendezvous {
        barrier: Arc::new(Barrier::new(THREADS)),
        candidates: Arc::new(Mutex::new(Vec::new())),
    };
    let provider = provider_with(rendezvous.clone());

    let results: Vec<Arc<ParsedFile>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| scope.spawn(|| provider.parsed(&foo()).unwrap().unwrap()))
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    let survivor = provider.cached_parsed(&foo()).unwrap();
    for parsed in &results {
        assert!(Arc::ptr_eq(parsed, &survivor));
    }
    assert!(survivor.is_valid());
    assert_eq!(survivor.invalidation_count(), 0);

    let counts: Vec<u32> = rendezvous
        .candidates
        .lock()
        .iter()
        .map(|counter| counter.load(Ordering::SeqCst))
        .collect();
    assert_eq!(counts.len(), THREADS);
    assert_eq!(counts.iter().filter(|&&count| count == 1).count(), THREADS - 1);
    assert_eq!(counts.iter().filter(|&&count| count == 0).count(), 1);
}

#[test]
fn test_parallel_readers_share_one_tree() {
    let provider = provider_with(TokenParserDefinition::new());

    let trees: Vec<_> = (0..64)
        .into_par_iter()
        .map(|_| {
            let parsed = provider.parsed(&foo()).unwrap().unwrap();
            parsed.calc_tree_element().unwrap()
        })
        .collect();

    let first = &trees[0];
    assert!(trees.iter().all(|tree| Arc::ptr_eq(tree, first)));
    assert_eq!(provider.known_tree_roots().len(), 1);
}

#[test]
fn test_plain_text_file_under_contention() {
    let project = Project::builder()
        .limits(FileSizeLimits::new(MIB, MIB))
        .build();
    let file = Arc::new(LightVirtualFile::new("a.txt", FileType::plain_text(), "abc"));
    let provider = project.view_provider(file);
    let language = provider.base_language().clone();

    let results: Vec<_> = (0..THREADS)
        .into_par_iter()
        .map(|_| provider.parsed(&language).unwrap().unwrap())
        .collect();

    assert!(results.iter().all(|parsed| Arc::ptr_eq(parsed, &results[0])));
}
