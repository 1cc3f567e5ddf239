// japy-sema - Semantic analysis pass for the Japy language
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Configuration of an analysis pass.

/// Return type every method is expected to declare unless configured otherwise.
pub const DEFAULT_EXPECTED_RETURN_TYPE: &str = "MethodReturnType";

/// Key prefix used to resolve call targets in variable initializers.
pub const DEFAULT_CALL_TARGET_PREFIX: &str = "function_";

/// How method return types are validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnTypeRule {
    /// Every method must declare exactly this return type.
    ExpectToken(String),
    /// Return types are not checked.
    Disabled,
}

impl ReturnTypeRule {
    /// Get the expected type for a declared return type.
    ///
    /// Returns `None` when the declared type is acceptable.
    pub fn violation(&self, declared: &str) -> Option<&str> {
        match self {
            ReturnTypeRule::ExpectToken(expected) if expected != declared => Some(expected.as_str()),
            _ => None,
        }
    }
}

impl Default for ReturnTypeRule {
    fn default() -> Self {
        ReturnTypeRule::ExpectToken(DEFAULT_EXPECTED_RETURN_TYPE.to_string())
    }
}

/// Options for the semantic analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Validation applied to method return types.
    pub return_type_rule: ReturnTypeRule,
    /// Prefix of the key a call target is looked up under.
    pub call_target_prefix: String,
}

impl AnalyzerOptions {
    /// Create the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the return type rule.
    pub fn with_return_type_rule(mut self, rule: ReturnTypeRule) -> Self {
        self.return_type_rule = rule;
        self
    }

    /// Set the call target key prefix.
    pub fn with_call_target_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.call_target_prefix = prefix.into();
        self
    }

    /// Build the key a call target named `callee` is stored under.
    pub fn call_target_key(&self, callee: &str) -> String {
        format!("{}{}", self.call_target_prefix, callee)
    }
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            return_type_rule: ReturnTypeRule::default(),
            call_target_prefix: DEFAULT_CALL_TARGET_PREFIX.to_string(),
        }
    }
}
