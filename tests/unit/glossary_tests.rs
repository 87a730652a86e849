/*!
 * Tests for the glossary model and its file loaders
 */

use anyhow::Result;
use std::path::Path;

use yamat::errors::GlossaryError;
use yamat::translation::glossary::{Glossary, load_glossary, load_glossary_lenient};

use crate::common;

#[test]
fn test_fromRows_helloWorld_shouldMapBothTerms() {
    let glossary = common::sample_glossary();

    let pairs: Vec<(&str, &str)> = glossary
        .iter()
        .map(|e| (e.source_term.as_str(), e.target_term.as_str()))
        .collect();
    assert_eq!(pairs, vec![("Hello", "Hola"), ("world", "mundo")]);
}

#[test]
fn test_fromRows_repeatedSource_lastRowWins() {
    let glossary = Glossary::from_rows([["a", "x"], ["b", "z"], ["a", "y"]]);

    assert_eq!(glossary.len(), 2);
    assert_eq!(glossary.get("a"), Some("y"));
    assert_eq!(glossary.to_prompt_lines(), "a: y\nb: z");
}

#[test]
fn test_loadGlossary_csvWithQuotedComma_shouldKeepWholeCell() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "terms.csv", "source,target\n\"Hello, friend\",\"Hola, amigo\"\n")?;

    let glossary = load_glossary(&path)?;

    assert_eq!(glossary.get("Hello, friend"), Some("Hola, amigo"));
    Ok(())
}

#[test]
fn test_loadGlossary_extraColumns_shouldBeIgnored() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "terms.csv", "source,target,notes\nworld,mundo,common noun\n")?;

    let glossary = load_glossary(&path)?;

    assert_eq!(glossary.len(), 1);
    assert_eq!(glossary.get("world"), Some("mundo"));
    Ok(())
}

#[test]
fn test_loadGlossary_headerOnly_shouldBeEmpty() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "terms.csv", "source,target\n")?;

    let glossary = load_glossary(&path)?;

    assert!(glossary.is_empty());
    Ok(())
}

#[test]
fn test_loadGlossary_emptyFile_shouldBeEmpty() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "terms.csv", "")?;

    let glossary = load_glossary(&path)?;

    assert!(glossary.is_empty());
    Ok(())
}

#[test]
fn test_loadGlossary_uppercaseExtension_shouldBeRecognised() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "TERMS.CSV", "en,es\nHello,Hola\n")?;

    let glossary = load_glossary(&path)?;

    assert_eq!(glossary.get("Hello"), Some("Hola"));
    Ok(())
}

#[test]
fn test_loadGlossary_xlsxWorkbook_shouldSkipHeaderAndBlankRows() -> Result<()> {
    // Header row, a numeric source cell, an empty row 4 and a row without a target
    let glossary = load_glossary(&common::fixture_path("glossary.xlsx"))?;

    let pairs: Vec<(&str, &str)> = glossary
        .iter()
        .map(|e| (e.source_term.as_str(), e.target_term.as_str()))
        .collect();
    assert_eq!(pairs, vec![("Hello", "Hola"), ("7", "siete"), ("world", "mundo")]);
    assert_eq!(glossary.get("English"), None);
    assert_eq!(glossary.get("orphan"), None);
    Ok(())
}

#[test]
fn test_loadGlossaryLenient_xlsxWorkbook_shouldHaveNoNotice() {
    let (glossary, notice) = load_glossary_lenient(&common::fixture_path("glossary.xlsx"));

    assert!(notice.is_none());
    assert_eq!(glossary.len(), 3);
}

#[test]
fn test_loadGlossary_missingFile_shouldBeUnreadable() {
    let result = load_glossary(Path::new("/nonexistent/terms.csv"));
    assert!(matches!(result, Err(GlossaryError::Unreadable { .. })));
}

#[test]
fn test_loadGlossaryLenient_missingFile_shouldReturnNotice() {
    let (glossary, notice) = load_glossary_lenient(Path::new("/nonexistent/terms.xlsx"));

    assert!(glossary.is_empty());
    assert!(matches!(notice, Some(GlossaryError::Unreadable { .. })));
}

#[test]
fn test_audit_shouldBeCaseSensitive() {
    let glossary = common::sample_glossary();

    let audit = glossary.audit("hello World", "hola mundo");

    assert_eq!(audit.applicable, 0);
    assert!(audit.is_satisfied());
}

#[test]
fn test_audit_allTermsPresent_shouldBeSatisfied() {
    let glossary = common::sample_glossary();

    let audit = glossary.audit(common::SAMPLE_TEXT, "¡Hola mundo! Este es un mensaje de prueba.");

    assert_eq!(audit.applicable, 2);
    assert!(audit.is_satisfied());
}
