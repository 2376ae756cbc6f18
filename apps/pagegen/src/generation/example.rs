// The worked example embedded in every generation prompt. The model must copy
// its structure (keys, nesting, inline markup conventions) exactly and replace
// only the text, in the target language.

/// Icon identifiers the model may pick from for `why_us.highlights` items.
pub const ICON_CHOICES: &[&str] = &[
    "chart-line",
    "magnifying-glass",
    "rocket",
    "globe",
    "users",
    "gears",
    "lightbulb",
    "shield-check",
    "bullseye",
    "handshake",
];

/// Backfilled onto any highlight item the model leaves without an icon.
pub const DEFAULT_ICON: &str = "chart-line";

/// Complete example page, one entry per required section.
pub const PAGE_EXAMPLE: &str = r#"{
  "hero": {
    "headline": "Supercharge Your SEO With Single Grain's AI-Powered Search Everywhere Philosophy",
    "description": "Single Grain is an SEO agency that helps you dominate organic visibility on every channel, from Google and Bing to TikTok and ChatGPT. We pioneer the use of cutting-edge AI and automation technologies.",
    "cta": "Rank and Convert Everywhere"
  },
  "why_us": {
    "title": "Why 'Search Everywhere' is The Future of SEO",
    "intro": "Traditional SEO is no longer enough. People don't just look for information on Google; they're discovering brands on Amazon, searching inside TikTok, using voice assistants, and asking AI chatbots for recommendations.\n\nAt Single Grain, we make sure your brand is visible and optimized across all digital touchpoints, including:",
    "highlights": [
      {"title": "Search Engines", "description": "Google, Bing, Yahoo, AI Overviews", "icon": "magnifying-glass"},
      {"title": "Social Platforms", "description": "Meta (Facebook/Instagram), TikTok, LinkedIn, X (Twitter), Pinterest", "icon": "users"},
      {"title": "AI Platforms (LLMs)", "description": "ChatGPT, Gemini, Perplexity, Claude, Grok", "icon": "lightbulb"},
      {"title": "Forums & Communities", "description": "Reddit, Quora, Stack Overflow", "icon": "globe"}
    ],
    "mini_cta": {"title": "Ready to Elevate Your Visibility? Let's Talk!", "cta": "Work With Us"}
  },
  "methodology": {
    "title": "How We Use 'Search Everywhere' to Supercharge Your Online Presence",
    "intro": "We don't just sprinkle keywords on a webpage. At Single Grain, Search Everywhere Optimization means embedding your brand in every corner of the digital landscape.",
    "steps": [
      {"title": "Keyword Research: The Right Keywords on the Right Platforms", "description": "We go beyond Google. Our team researches high-intent keywords and trending queries across each platform your audience uses, from traditional search engines to AI chat tools and online communities."},
      {"title": "Competitor Research per Platform", "description": "We analyze how your top competitors perform on each channel, breaking down their keyword wins, content strategies, and share of voice. Platform-specific benchmarking helps you spot the white space they've missed."},
      {"title": "Cross-Platform Optimizations", "description": "Once we have the data, we get to work. Whether it's rewriting AI-friendly content, optimizing social metadata, or improving E-E-A-T for search engines, we implement platform-specific improvements to increase discoverability."},
      {"title": "Reporting: Curious How You Stack Up Everywhere?", "description": "Our reporting gives you a full-funnel view of your brand's visibility across search engines, social platforms, AI tools, and forums, and shows you where to double down next."}
    ],
    "cta": {"title": "Ready to Skyrocket Your Growth?", "cta": "Work With Us"}
  },
  "services_overview": {
    "title": "Our Services",
    "description": "We offer a comprehensive suite of digital marketing services, each of our specialized solutions designed to grow your revenue and put you ahead of your competition.",
    "services": [
      {"title": "Content Strategy & Optimization", "description": "Content Strategy, Research & Brief Writing, Content Writing, Keyword Research, Existing Content Optimization & Pruning, FAQs Creation"},
      {"title": "Technical SEO", "description": "Keyword Gap Auditing, Cannibalization Analysis, NLP Optimization for AI Search"},
      {"title": "Link Building & Off-Site SEO", "description": "Featured Snippet Targeting, Guest Blogging Opportunities, Digital PR & Outreach, Competitor Link Analysis"},
      {"title": "UX & CRO", "description": "User Experience Audits, Conversion Rate Optimization, A/B Testing Strategy, User Journey Mapping"},
      {"title": "Reporting & Communications", "description": "Comprehensive SEO Reporting, KPI Tracking & Analysis, Regular Status Updates, Performance Insights"}
    ]
  },
  "differentiators": [
    {"title": "Holistic, Omni-Channel Perspective", "description": "We believe SEO should encompass all the ways customers search. Whether they type on a laptop, speak into Siri, or ask ChatGPT, your brand needs to show up and stand out."},
    {"title": "Data-Driven Decision Making", "description": "Our team of analysts, strategists, and AI specialists doesn't rely on guesswork. We leverage robust analytics, user behavior data, and real-time signals to identify high-impact actions."},
    {"title": "Custom Strategy & Execution", "description": "No cookie-cutter tactics. Every brand is unique, so we tailor an in-depth plan around your specific goals, industry, and target audience, then continually refine it."},
    {"title": "Transparent Reporting & Collaboration", "description": "You always know what we're working on, how your campaigns are performing, and where new opportunities lie. We operate as an extension of your marketing team."}
  ],
  "closing": {
    "title": "Ready to Win Across Every Search Channel?",
    "description": "If you're ready to move beyond outdated SEO tactics and start showing up where your audience actually searches, Single Grain is the partner to make it happen. Let's future-proof your visibility, everywhere search happens.",
    "cta": "Boost Rankings & Revenue"
  }
}"#;
