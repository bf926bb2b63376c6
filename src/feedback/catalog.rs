//! Static advice text.

use crate::analysis::Complexity;
use crate::detect::FindingKind;
use crate::score::SkillLevel;

/// Generic praise used to pad the strengths list.
pub const PRAISE: &[&str] = &[
    "Great job keeping your functions small and focused!",
    "Your variable names are clear and descriptive.",
    "Good use of comments to explain complex logic.",
    "Well-structured code with proper indentation.",
    "You're following good naming conventions.",
    "Nice use of built-in functions and libraries.",
    "Your code is well-organized and easy to read.",
    "Good separation of concerns in your functions.",
    "You're handling edge cases properly.",
    "Excellent use of functions to avoid repetition.",
];

pub fn complexity_explanation(complexity: Complexity) -> &'static str {
    match complexity {
        Complexity::Constant => {
            "Constant time - Excellent! Your code runs at the same speed regardless of input size."
        }
        Complexity::Linear => {
            "Linear time - Good! Your code's speed increases proportionally with input size."
        }
        Complexity::Quadratic => {
            "Quadratic time - Be careful! Your code slows down quickly as input grows."
        }
        Complexity::Cubic => "Cubic time - Warning! This can become very slow with larger inputs.",
        Complexity::Exponential => {
            "Exponential time - Critical! This will be extremely slow even with small inputs."
        }
    }
}

/// Improvement tip for a complexity class. Quadratic code only gets one
/// when nested loops are actually present.
pub fn improvement_tip(complexity: Complexity, nested_loops: usize) -> &'static str {
    match complexity {
        Complexity::Quadratic if nested_loops > 0 => {
            "Consider using hash tables or sorting to reduce nested loops."
        }
        Complexity::Cubic => "This is very slow for large inputs. Look for algorithmic improvements.",
        Complexity::Exponential => {
            "Exponential complexity is rarely acceptable. Consider dynamic programming."
        }
        _ => "",
    }
}

/// Study topic and resources for a finding kind.
pub fn learning_resources(kind: FindingKind) -> (&'static str, &'static [&'static str]) {
    match kind {
        FindingKind::NestedLoops => (
            "Algorithm Optimization",
            &[
                "Book: 'Grokking Algorithms' by Aditya Bhargava",
                "Video: 'Big O Notation' by CS Dojo",
                "Practice: LeetCode problems on time complexity",
                "Article: 'When to use which loop' on GeeksforGeeks",
            ],
        ),
        FindingKind::TooManyConditions => (
            "Code Refactoring",
            &[
                "Book: 'Clean Code' by Robert C. Martin",
                "Video: 'Refactoring techniques' by CodeAesthetic",
                "Practice: Replace conditional with polymorphism",
                "Article: 'Strategy Pattern' on Refactoring Guru",
            ],
        ),
        FindingKind::UnusedVariable => (
            "Code Cleanup",
            &[
                "Book: 'The Pragmatic Programmer'",
                "Video: 'Dead code elimination'",
                "Practice: Use linters like pylint or flake8",
                "Article: 'DRY Principle' on Wikipedia",
            ],
        ),
        FindingKind::LongFunction => (
            "Function Design",
            &[
                "Book: 'Clean Code' Chapter 3",
                "Video: 'Single Responsibility Principle'",
                "Practice: Break functions > 20 lines",
                "Article: 'Function decomposition' on Medium",
            ],
        ),
        FindingKind::DeepIndentation => (
            "Code Structure",
            &[
                "Book: 'The Art of Readable Code'",
                "Video: 'Flattening nested code'",
                "Practice: Use early returns",
                "Article: 'Guard clauses' on Dev.to",
            ],
        ),
        FindingKind::MagicNumbers => (
            "Code Constants",
            &[
                "Book: 'Code Complete' by Steve McConnell",
                "Video: 'Why magic numbers are bad'",
                "Practice: Replace with named constants",
                "Article: 'Constants in programming' on FreeCodeCamp",
            ],
        ),
    }
}

/// Fallback topic when there is nothing specific to study.
pub const GENERAL_TOPIC: &str = "General Programming Best Practices";

pub const GENERAL_RESOURCES: &[&str] = &[
    "Book: 'Clean Code' by Robert C. Martin",
    "Video: 'Programming Principles' by FreeCodeCamp",
    "Practice: Code reviews and pair programming",
    "Article: '10 Good Programming Practices' on Medium",
];

pub fn next_steps(level: SkillLevel) -> [&'static str; 3] {
    match level {
        SkillLevel::Beginner => [
            "1. Practice: Write 5 small programs focusing on one concept each",
            "2. Read: Complete one chapter of a beginner programming book",
            "3. Review: Compare your code with examples in documentation",
        ],
        SkillLevel::Intermediate => [
            "1. Refactor: Pick one project and improve its structure",
            "2. Learn: Study one design pattern this week",
            "3. Contribute: Fix one issue in an open-source project",
        ],
        SkillLevel::Advanced => [
            "1. Optimize: Profile your code and improve performance",
            "2. Teach: Write a tutorial about what you've learned",
            "3. Architect: Design a larger system with multiple components",
        ],
    }
}

pub const NESTED_LOOPS_FOCUS: &str = "Focus: Practice algorithms with better time complexity";
pub const LONG_FUNCTION_FOCUS: &str = "Focus: Break one long function into smaller ones this week";

pub const AI_NOTE: &str = "Note: Code shows patterns similar to AI-generated code. \
                           Make sure you understand and write code yourself.";
