use crate::layers::{
    DEPTH_FALLOFF, MAX_LAYERS, POSITION_MAX, POSITION_MIN, SPAWN_OPACITY, SPAWN_SCALE,
};

/// The whole front end in one page. The display-policy constants come from
/// `layers` so the browser renderer and the Rust model cannot drift apart.
pub fn render_index() -> String {
    INDEX_HTML
        .replace("{{MAX_LAYERS}}", &MAX_LAYERS.to_string())
        .replace("{{DEPTH_FALLOFF}}", &DEPTH_FALLOFF.to_string())
        .replace("{{SPAWN_SCALE}}", &SPAWN_SCALE.to_string())
        .replace("{{SPAWN_OPACITY}}", &SPAWN_OPACITY.to_string())
        .replace("{{POSITION_MIN}}", &POSITION_MIN.to_string())
        .replace("{{POSITION_MAX}}", &POSITION_MAX.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>The Ledger</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #0b0e1a;
      --bg-2: #1d2440;
      --ink: #f2efe6;
      --muted: #8d93ad;
      --good: #7ee2a8;
      --bad: #ff7a6b;
      --veil: rgba(11, 14, 26, 0.65);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      overflow: hidden;
      background: radial-gradient(circle at 30% 20%, var(--bg-2), transparent 55%),
        radial-gradient(circle at 75% 80%, #2a1d40, transparent 50%),
        var(--bg-1);
      color: var(--ink);
      font-family: 'Space Grotesk', 'Trebuchet MS', sans-serif;
    }

    .layers {
      position: fixed;
      inset: 0;
      pointer-events: none;
    }

    .layer {
      position: absolute;
      inset: 0;
      transition: transform 600ms ease, opacity 600ms ease;
    }

    .layer h2 {
      position: absolute;
      margin: 0;
      transform: translate(-50%, -50%);
      font-family: 'Fraunces', 'Georgia', serif;
      font-weight: 600;
      font-size: clamp(1.1rem, 2.4vw, 1.8rem);
      white-space: nowrap;
      text-shadow: 0 2px 18px var(--veil);
    }

    .layer h2.positive {
      color: var(--good);
    }

    .layer h2.negative {
      color: var(--bad);
    }

    .welcome {
      position: fixed;
      top: 22%;
      left: 50%;
      transform: translateX(-50%);
      width: min(560px, 90vw);
      text-align: center;
      display: grid;
      gap: 10px;
    }

    .welcome h1 {
      font-family: 'Fraunces', 'Georgia', serif;
      font-weight: 600;
      font-size: clamp(2.2rem, 5vw, 3.2rem);
      margin: 0;
    }

    .welcome p {
      margin: 0;
      color: var(--muted);
      font-size: 1.05rem;
    }

    .prompt {
      position: fixed;
      bottom: 8vh;
      left: 50%;
      transform: translateX(-50%);
      width: min(520px, 88vw);
    }

    .prompt input {
      width: 100%;
      appearance: none;
      border: 1px solid rgba(242, 239, 230, 0.18);
      border-radius: 999px;
      padding: 16px 24px;
      font-size: 1.05rem;
      font-family: inherit;
      color: var(--ink);
      background: rgba(29, 36, 64, 0.72);
      backdrop-filter: blur(10px);
      outline: none;
      transition: border-color 150ms ease;
    }

    .prompt input:focus {
      border-color: rgba(242, 239, 230, 0.45);
    }

    .prompt input:disabled {
      opacity: 0.5;
    }

    .reset {
      position: fixed;
      top: 18px;
      right: 18px;
      display: none;
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 8px 16px;
      font-size: 0.85rem;
      font-family: inherit;
      font-weight: 600;
      color: var(--muted);
      background: rgba(29, 36, 64, 0.72);
      cursor: pointer;
    }

    .reset:hover {
      color: var(--ink);
    }
  </style>
</head>
<body>
  <div id="layers" class="layers"></div>

  <section id="welcome" class="welcome">
    <h1>The Ledger</h1>
    <p>Every deed gets weighed. Tell the ledger your name to open an account.</p>
  </section>

  <div class="prompt">
    <input id="input" name="username" type="text" placeholder="Type your name"
           autocomplete="off" autofocus />
  </div>
  <button id="reset" class="reset" type="button">Start over</button>

  <script>
    const MAX_LAYERS = {{MAX_LAYERS}};
    const DEPTH_FALLOFF = {{DEPTH_FALLOFF}};
    const SPAWN_SCALE = {{SPAWN_SCALE}};
    const SPAWN_OPACITY = {{SPAWN_OPACITY}};
    const POSITION_MIN = {{POSITION_MIN}};
    const POSITION_MAX = {{POSITION_MAX}};

    const inputEl = document.getElementById('input');
    const layersEl = document.getElementById('layers');
    const welcomeEl = document.getElementById('welcome');
    const resetEl = document.getElementById('reset');

    let nextZ = 1;

    const getRandomPosition = () => {
      const top = Math.random() * (POSITION_MAX - POSITION_MIN) + POSITION_MIN;
      const left = Math.random() * (POSITION_MAX - POSITION_MIN) + POSITION_MIN;
      return { top, left };
    };

    const recalculateScaleAndOpacity = () => {
      const children = layersEl.children;
      for (let i = 0; i < children.length; i++) {
        const fade = 1 - i * DEPTH_FALLOFF;
        children[i].style.transform = `scale(${fade})`;
        children[i].style.opacity = `${fade}`;
      }
    };

    const addLayer = (action) => {
      const layer = document.createElement('div');
      const position = getRandomPosition();
      layer.classList.add('layer');
      layer.style.opacity = `${SPAWN_OPACITY}`;
      layer.style.transform = `scale(${SPAWN_SCALE})`;
      layer.style.zIndex = String(nextZ++);

      const label = document.createElement('h2');
      label.className = action.points > 0 ? 'positive' : 'negative';
      label.style.top = `${position.top}%`;
      label.style.left = `${position.left}%`;
      const sign = action.points > 0 ? '+' : '';
      label.textContent = `${action.action}: ${sign}${action.points}`;
      layer.appendChild(label);

      layersEl.insertBefore(layer, layersEl.firstChild);

      // Let the spawn state paint, then transition on the next frame.
      requestAnimationFrame(() => {
        layer.style.opacity = '1';
        layer.style.transform = 'scale(1)';
      });

      if (layersEl.children.length > MAX_LAYERS) {
        layersEl.removeChild(layersEl.lastChild);
      }

      recalculateScaleAndOpacity();
    };

    const enterActionMode = () => {
      welcomeEl.style.display = 'none';
      resetEl.style.display = 'block';
      inputEl.name = 'action';
      inputEl.placeholder = 'Type your sin';
    };

    const fetchUser = async (userUuid) => {
      const response = await fetch(`/user/${userUuid}`);
      if (!response.ok) {
        return null;
      }
      return response.json();
    };

    const createUser = async (name) => {
      inputEl.disabled = true;
      try {
        const response = await fetch('/user', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ username: name }),
        });
        if (!response.ok) {
          throw new Error(`create user failed: ${response.status}`);
        }
        const data = await response.json();
        localStorage.setItem('userUuid', data.userUuid);
        inputEl.value = '';
        enterActionMode();
      } catch (error) {
        console.error('Error:', error);
      } finally {
        inputEl.disabled = false;
        inputEl.focus();
      }
    };

    const sendAction = async (userUuid, message) => {
      inputEl.disabled = true;
      try {
        const response = await fetch('/', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ userUuid, message }),
        });
        if (!response.ok) {
          throw new Error(`classification failed: ${response.status}`);
        }
        const data = await response.json();
        addLayer(data.response);
        inputEl.value = '';
      } catch (error) {
        console.error('Error:', error);
      } finally {
        inputEl.disabled = false;
        inputEl.focus();
      }
    };

    resetEl.addEventListener('click', () => {
      localStorage.removeItem('userUuid');
      window.location.reload();
    });

    inputEl.addEventListener('keypress', (event) => {
      if (event.key !== 'Enter') {
        return;
      }
      const value = inputEl.value.trim();
      if (value === '') {
        return;
      }
      const userUuid = localStorage.getItem('userUuid');
      if (userUuid) {
        sendAction(userUuid, value);
      } else {
        createUser(value);
      }
    });

    document.addEventListener('DOMContentLoaded', async () => {
      const userUuid = localStorage.getItem('userUuid');
      if (!userUuid) {
        return;
      }
      const user = await fetchUser(userUuid);
      if (!user) {
        localStorage.removeItem('userUuid');
        return;
      }
      // Replay oldest first so the newest action ends up on top.
      const replay = user.actions.results.slice().reverse();
      replay.forEach((action, index) => {
        setTimeout(() => addLayer(action), index * 250);
      });
      enterActionMode();
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_substitutes_every_placeholder() {
        let page = render_index();
        assert!(!page.contains("{{"));
        assert!(page.contains("const MAX_LAYERS = 20;"));
        assert!(page.contains("const DEPTH_FALLOFF = 0.05;"));
        assert!(page.contains("const SPAWN_SCALE = 5;"));
        assert!(page.contains("const POSITION_MIN = 20;"));
        assert!(page.contains("const POSITION_MAX = 70;"));
    }
}
