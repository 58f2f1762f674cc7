//! # zjlab
//!
//! This library provides the functionality behind the `zjlab` command-line
//! tool: scaffolding new projects from remote template repositories, and
//! handing everything else over to the Vue CLI.
//!
//! ## Quick Example
//!
//! ```
//! use zjlab::template::{Template, TemplateRegistry};
//!
//! let registry = TemplateRegistry::builtin();
//!
//! assert_eq!(registry.lookup("default").unwrap(), Template::Default);
//! assert_eq!(
//!     registry.resolve("node").unwrap(),
//!     "https://github.com/lidasong/create-node-api.git"
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - **Templates (`template`)**: Map a short identifier to a clone URL through
//!   a lookup table or a URL pattern.
//! - **Scaffolding (`scaffold`, `git`, `manifest`, `package_manager`)**: Clone
//!   the template, strip its git metadata, rename the package after the
//!   target directory, and install its dependencies.
//! - **Delegation (`delegate`, `node`)**: Build and run `vue` and
//!   `vue-cli-service` command lines after checking the Node.js version.
//! - **Configuration (`config`, `defaults`)**: The optional YAML file that
//!   adds templates and names the external programs to run.
//!
//! ## Execution Flow
//!
//! For `zjlab create my-app --template node`:
//!
//! 1.  **Resolve**: Look the template up in the registry.
//! 2.  **Fetch**: Clone into a staging directory beside `my-app`, strip
//!     `.git`, then move the result into place.
//! 3.  **Rename**: Set the `name` in `my-app/package.json` to `my-app`.
//! 4.  **Install**: Run `yarn install` (or npm) inside `my-app`.
//!
//! Every step runs to completion before the next begins.

pub mod config;
pub mod defaults;
pub mod delegate;
pub mod envinfo;
pub mod error;
pub mod git;
pub mod manifest;
pub mod node;
pub mod output;
pub mod package_manager;
pub mod scaffold;
pub mod suggestions;
pub mod template;
