//! Framework code samples shown in the showcase's code tabs.

use indoc::indoc;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Framework {
    #[default]
    React,
    Vue,
    Svelte,
}

impl Framework {
    pub const ALL: [Framework; 3] = [Framework::React, Framework::Vue, Framework::Svelte];

    /// Identifier used for tab ids and the stored preference
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Vue => "vue",
            Framework::Svelte => "svelte",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Framework::React => "React",
            Framework::Vue => "Vue",
            Framework::Svelte => "Svelte",
        }
    }

    /// Syntax token handed to the highlighter
    pub fn language(&self) -> &'static str {
        match self {
            Framework::React => "js",
            Framework::Vue | Framework::Svelte => "html",
        }
    }

    pub fn sample(&self) -> &'static str {
        match self {
            Framework::React => REACT_SAMPLE,
            Framework::Vue => VUE_SAMPLE,
            Framework::Svelte => SVELTE_SAMPLE,
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Framework::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown framework '{}'", s))
    }
}

const REACT_SAMPLE: &str = indoc! {r#"
    import { useState } from 'react';

    export function Counter() {
      const [count, setCount] = useState(0);
      return (
        <button className="btn btn-primary" onClick={() => setCount(count + 1)}>
          Clicked {count} times
        </button>
      );
    }
"#};

const VUE_SAMPLE: &str = indoc! {r#"
    <script setup>
    import { ref } from 'vue';
    const count = ref(0);
    </script>

    <template>
      <button class="btn btn-primary" @click="count++">
        Clicked {{ count }} times
      </button>
    </template>
"#};

const SVELTE_SAMPLE: &str = indoc! {r#"
    <script>
      let count = 0;
    </script>

    <button class="btn btn-primary" on:click={() => count += 1}>
      Clicked {count} times
    </button>
"#};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for framework in Framework::ALL {
            assert_eq!(framework.as_str().parse::<Framework>(), Ok(framework));
        }
        assert!("angular".parse::<Framework>().is_err());
    }

    #[test]
    fn test_samples_are_dedented() {
        for framework in Framework::ALL {
            let sample = framework.sample();
            assert!(!sample.starts_with(' '));
            assert!(sample.contains("btn btn-primary"));
        }
    }
}
